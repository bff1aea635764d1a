use async_trait::async_trait;

use rolegrant_core::AppResult;
use rolegrant_domain::{
    Permission, Role, RolePermission, RolePermissionWithPermission, RolePermissionWithRole,
};

use super::inputs::{CreatePermissionInput, CreateRoleInput, UpdatePermissionInput, UpdateRoleInput};

/// Repository port for role rows.
#[async_trait]
pub trait SysRoleRepository: Send + Sync {
    /// Inserts a role and returns the stored row.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role>;

    /// Applies a partial update and returns the stored row.
    async fn update_role(&self, role_id: &str, input: UpdateRoleInput) -> AppResult<Role>;

    /// Deletes a role and returns the removed row.
    async fn delete_role(&self, role_id: &str) -> AppResult<Role>;

    /// Lists every role in insertion order.
    async fn get_all(&self) -> AppResult<Vec<Role>>;

    /// Finds a role by identifier.
    async fn get_role_by_id(&self, role_id: &str) -> AppResult<Option<Role>>;
}

/// Repository port for permission rows.
#[async_trait]
pub trait SysPermissionRepository: Send + Sync {
    /// Inserts a permission and returns the stored row.
    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission>;

    /// Applies a partial update and returns the stored row.
    async fn update_permission(
        &self,
        permission_id: &str,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission>;

    /// Deletes a permission and returns the removed row.
    async fn delete_permission(&self, permission_id: &str) -> AppResult<Permission>;

    /// Lists every permission in insertion order.
    async fn get_all(&self) -> AppResult<Vec<Permission>>;

    /// Finds a permission by identifier.
    async fn get_permission_by_id(&self, permission_id: &str) -> AppResult<Option<Permission>>;
}

/// Repository port for the role/permission association.
///
/// Implementations report a missing permission before a missing role.
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    /// Grants a permission to a role.
    async fn assign_permission_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission>;

    /// Revokes a permission from a role and returns the removed association.
    async fn remove_permission_from_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission>;

    /// Lists the permissions granted to a role.
    async fn get_permissions_by_role(
        &self,
        role_id: &str,
    ) -> AppResult<Vec<RolePermissionWithPermission>>;

    /// Lists the roles holding a permission.
    async fn get_roles_in_permission(
        &self,
        permission_id: &str,
    ) -> AppResult<Vec<RolePermissionWithRole>>;

    /// Returns whether the permission is granted to the role.
    async fn is_permission_assigned_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<bool>;
}
