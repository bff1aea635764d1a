use std::sync::Arc;

use rolegrant_core::{AppResult, NonEmptyString};

use crate::security_ports::{RolePermissionRepository, SysPermissionRepository, SysRoleRepository};

mod assignments;
mod permissions;
mod roles;


/// Application service for role, permission, and grant administration.
#[derive(Clone)]
pub struct RoleAdminService {
    role_repository: Arc<dyn SysRoleRepository>,
    permission_repository: Arc<dyn SysPermissionRepository>,
    role_permission_repository: Arc<dyn RolePermissionRepository>,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn SysRoleRepository>,
        permission_repository: Arc<dyn SysPermissionRepository>,
        role_permission_repository: Arc<dyn RolePermissionRepository>,
    ) -> Self {
        Self {
            role_repository,
            permission_repository,
            role_permission_repository,
        }
    }
}

fn normalize_name(value: &str, field: &str) -> AppResult<String> {
    NonEmptyString::trimmed(value, field).map(String::from)
}

fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|description| description.trim().to_owned())
        .filter(|description| !description.is_empty())
}
