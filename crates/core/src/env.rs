use std::env;

use crate::{AppError, AppResult};

/// Returns the value bound to `key` in the process environment.
///
/// Fails with [`AppError::Configuration`] when the key is blank or the variable is unset,
/// not valid UTF-8, or empty.
pub fn get_env(key: &str) -> AppResult<String> {
    lookup_env(key, |name| env::var(name).ok())
}

/// Returns the value bound to `key`, or `default` when the variable is unset or empty.
pub fn get_env_or(key: &str, default: &str) -> AppResult<String> {
    lookup_env_or(key, default, |name| env::var(name).ok())
}

/// Resolves `key` through an arbitrary lookup function.
pub fn lookup_env<F>(key: &str, lookup: F) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    if key.trim().is_empty() {
        return Err(AppError::Configuration(
            "environment variable name must not be empty".to_owned(),
        ));
    }

    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!(
            "missing environment variable: {key}"
        ))),
    }
}

/// Resolves `key` through `lookup`, falling back to `default` when no value is bound.
pub fn lookup_env_or<F>(key: &str, default: &str, lookup: F) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup_env(key, lookup) {
        Ok(value) => Ok(value),
        Err(_) if !key.trim().is_empty() => Ok(default.to_owned()),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::{get_env, get_env_or, lookup_env, lookup_env_or};
    use crate::AppError;

    fn fixed(name: &str) -> Option<String> {
        match name {
            "DATABASE_HOST" => Some("db.internal".to_owned()),
            "DATABASE_NAME" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn bound_value_is_returned() {
        let value = lookup_env("DATABASE_HOST", fixed);
        assert_eq!(value.unwrap_or_default(), "db.internal");
    }

    #[test]
    fn blank_key_is_a_configuration_error() {
        assert!(matches!(
            lookup_env("  ", fixed),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn unset_variable_names_the_key() {
        let result = lookup_env("DATABASE_USER", fixed);
        assert!(matches!(
            result,
            Err(AppError::Configuration(message)) if message == "missing environment variable: DATABASE_USER"
        ));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        assert!(matches!(
            lookup_env("DATABASE_NAME", fixed),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn process_variable_is_read() {
        // cargo exports the manifest directory to test binaries it runs
        let value = get_env("CARGO_MANIFEST_DIR");
        assert_eq!(value.unwrap_or_default(), env!("CARGO_MANIFEST_DIR"));
    }

    #[test]
    fn unset_process_variable_is_a_configuration_error() {
        let result = get_env("ROLEGRANT_TEST_SURELY_UNSET_VARIABLE");
        assert!(matches!(
            result,
            Err(AppError::Configuration(message))
                if message == "missing environment variable: ROLEGRANT_TEST_SURELY_UNSET_VARIABLE"
        ));
        assert!(matches!(get_env(""), Err(AppError::Configuration(_))));
    }

    #[test]
    fn default_applies_to_unset_variables_only() {
        let value = get_env_or("ROLEGRANT_TEST_SURELY_UNSET_VARIABLE", "5432");
        assert_eq!(value.unwrap_or_default(), "5432");
        assert!(get_env_or("", "5432").is_err());
    }

    #[test]
    fn default_does_not_shadow_bound_values() {
        let value = lookup_env_or("DATABASE_HOST", "localhost", fixed);
        assert_eq!(value.unwrap_or_default(), "db.internal");
        let value = lookup_env_or("DATABASE_NAME", "rolegrant", fixed);
        assert_eq!(value.unwrap_or_default(), "rolegrant");
    }
}
