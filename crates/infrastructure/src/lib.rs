//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod database;
mod postgres_errors;
mod postgres_role_permission_repository;
mod postgres_sys_permission_repository;
mod postgres_sys_role_repository;

#[cfg(test)]
mod test_support;

pub use database::{DATABASE_POOL_SIZE, DEFAULT_DATABASE_PORT, Database, DatabaseConfig};
pub use postgres_role_permission_repository::PostgresRolePermissionRepository;
pub use postgres_sys_permission_repository::PostgresSysPermissionRepository;
pub use postgres_sys_role_repository::PostgresSysRoleRepository;
