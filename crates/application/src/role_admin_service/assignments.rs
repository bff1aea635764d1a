use tracing::info;

use rolegrant_core::AppResult;
use rolegrant_domain::{RolePermission, RolePermissionWithPermission, RolePermissionWithRole};

use super::RoleAdminService;

impl RoleAdminService {
    /// Grants a permission to a role.
    pub async fn assign_permission(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission> {
        let assignment = self
            .role_permission_repository
            .assign_permission_to_role(role_id, permission_id)
            .await?;
        info!(role_id, permission_id, "permission assigned to role");
        Ok(assignment)
    }

    /// Revokes a permission from a role.
    pub async fn remove_permission(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission> {
        let assignment = self
            .role_permission_repository
            .remove_permission_from_role(role_id, permission_id)
            .await?;
        info!(role_id, permission_id, "permission removed from role");
        Ok(assignment)
    }

    /// Lists the permissions granted to a role.
    pub async fn permissions_for_role(
        &self,
        role_id: &str,
    ) -> AppResult<Vec<RolePermissionWithPermission>> {
        self.role_permission_repository
            .get_permissions_by_role(role_id)
            .await
    }

    /// Lists the roles holding a permission.
    pub async fn roles_for_permission(
        &self,
        permission_id: &str,
    ) -> AppResult<Vec<RolePermissionWithRole>> {
        self.role_permission_repository
            .get_roles_in_permission(permission_id)
            .await
    }

    /// Returns whether the permission is granted to the role.
    pub async fn is_permission_assigned(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<bool> {
        self.role_permission_repository
            .is_permission_assigned_to_role(role_id, permission_id)
            .await
    }
}
