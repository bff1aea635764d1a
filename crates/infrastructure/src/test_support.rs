use rolegrant_domain::new_record_id;
use sqlx::PgPool;

use crate::{Database, DatabaseConfig};

/// Returns a migrated pool, or `None` when no database is configured.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(config) = DatabaseConfig::from_env() else {
        return None;
    };

    let database = Database::connect_lazy(&config);
    if let Err(error) = database.migrate().await {
        panic!("failed to run migrations for postgres repository tests: {error}");
    }

    Some(database.pool())
}

/// Returns a name that cannot collide with rows left by earlier runs.
pub(crate) fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", new_record_id())
}
