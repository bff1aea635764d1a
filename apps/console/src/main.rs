//! Rolegrant operator console.

#![forbid(unsafe_code)]

mod command;

use std::env;
use std::sync::Arc;

use rolegrant_application::RoleAdminService;
use rolegrant_core::AppError;
use rolegrant_infrastructure::{
    Database, DatabaseConfig, PostgresRolePermissionRepository, PostgresSysPermissionRepository,
    PostgresSysRoleRepository,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::command::Command;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let command = Command::parse(&args)?;

    let config = DatabaseConfig::from_env()?;
    let database = Database::connect_lazy(&config);
    let service = build_role_admin_service(&database);

    info!(command = command.name(), "running console command");
    let result = command.run(&service, &database).await;
    database.close().await;

    let output = result.inspect_err(|error| {
        error!(error = %error, "console command failed");
    })?;

    println!("{output:#}");

    Ok(())
}

fn build_role_admin_service(database: &Database) -> RoleAdminService {
    RoleAdminService::new(
        Arc::new(PostgresSysRoleRepository::new(database.pool())),
        Arc::new(PostgresSysPermissionRepository::new(database.pool())),
        Arc::new(PostgresRolePermissionRepository::new(database.pool())),
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
