use std::fmt;

use rolegrant_core::{AppError, AppResult, get_env, get_env_or, lookup_env, lookup_env_or};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Upper bound on pooled database connections.
pub const DATABASE_POOL_SIZE: u32 = 5;

/// Port used when `DATABASE_PORT` is not set.
pub const DEFAULT_DATABASE_PORT: u16 = 5432;

/// Connection settings resolved from the process environment.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database server host name.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl DatabaseConfig {
    /// Reads `DATABASE_HOST`, `DATABASE_USER`, `DATABASE_PASSWORD`, `DATABASE_NAME` and the
    /// optional `DATABASE_PORT`.
    pub fn from_env() -> AppResult<Self> {
        Self::resolve(get_env, get_env_or)
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(
            |key| lookup_env(key, &lookup),
            |key, default| lookup_env_or(key, default, &lookup),
        )
    }

    fn resolve<R, O>(required: R, optional: O) -> AppResult<Self>
    where
        R: Fn(&str) -> AppResult<String>,
        O: Fn(&str, &str) -> AppResult<String>,
    {
        let host = required("DATABASE_HOST")?;
        let user = required("DATABASE_USER")?;
        let password = required("DATABASE_PASSWORD")?;
        let database = required("DATABASE_NAME")?;
        let port = optional(
            "DATABASE_PORT",
            DEFAULT_DATABASE_PORT.to_string().as_str(),
        )?
        .parse::<u16>()
        .map_err(|error| AppError::Configuration(format!("invalid DATABASE_PORT: {error}")))?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(self.host.as_str())
            .port(self.port)
            .username(self.user.as_str())
            .password(self.password.as_str())
            .database(self.database.as_str())
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Shared connection pool handle injected into repositories.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Builds the pool without opening connections; they are opened as queries run.
    #[must_use]
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(DATABASE_POOL_SIZE)
            .connect_lazy_with(config.connect_options());

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = DATABASE_POOL_SIZE,
            "database pool configured"
        );

        Self { pool }
    }

    /// Returns the pool handle for repository construction.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Verifies the database answers a trivial query.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Persistence(format!("database ping failed: {error}")))?;

        Ok(())
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> AppResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|error| AppError::Persistence(format!("failed to run migrations: {error}")))
    }

    /// Waits for checked-out connections to return and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use rolegrant_core::AppError;

    use super::{DEFAULT_DATABASE_PORT, DatabaseConfig};

    fn complete(name: &str) -> Option<String> {
        match name {
            "DATABASE_HOST" => Some("db.internal".to_owned()),
            "DATABASE_USER" => Some("rolegrant".to_owned()),
            "DATABASE_PASSWORD" => Some("hunter2".to_owned()),
            "DATABASE_NAME" => Some("rolegrant".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn config_defaults_port() {
        let config = DatabaseConfig::from_lookup(complete);
        assert_eq!(
            config.map(|config| config.port).ok(),
            Some(DEFAULT_DATABASE_PORT)
        );
    }

    #[test]
    fn missing_password_fails_before_connecting() {
        let result = DatabaseConfig::from_lookup(|name| {
            if name == "DATABASE_PASSWORD" {
                None
            } else {
                complete(name)
            }
        });

        assert!(matches!(
            result,
            Err(AppError::Configuration(message)) if message.contains("DATABASE_PASSWORD")
        ));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = DatabaseConfig::from_lookup(|name| {
            if name == "DATABASE_PORT" {
                Some("not-a-port".to_owned())
            } else {
                complete(name)
            }
        });

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = DatabaseConfig::from_lookup(complete);
        let rendered = config
            .map(|config| format!("{config:?}"))
            .unwrap_or_default();

        assert!(rendered.contains("db.internal"));
        assert!(!rendered.contains("hunter2"));
    }
}
