use rolegrant_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_code(error, UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_code(error, FOREIGN_KEY_VIOLATION)
}

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code)
    )
}

/// Maps a write failure, turning unique violations into conflicts.
pub(crate) fn map_write_error(error: sqlx::Error, action: &str, conflict: String) -> AppError {
    if is_unique_violation(&error) {
        return AppError::Conflict(conflict);
    }

    persistence_error(error, action)
}

pub(crate) fn persistence_error(error: sqlx::Error, action: &str) -> AppError {
    AppError::Persistence(format!("failed to {action}: {error}"))
}
