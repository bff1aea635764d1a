use tracing::info;

use rolegrant_core::AppResult;
use rolegrant_domain::Permission;

use crate::security_ports::{CreatePermissionInput, UpdatePermissionInput};

use super::{RoleAdminService, normalize_description, normalize_name};

impl RoleAdminService {
    /// Creates a permission with a trimmed, non-empty name.
    pub async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let input = CreatePermissionInput {
            name: normalize_name(input.name.as_str(), "permission name")?,
            description: normalize_description(input.description),
        };

        let permission = self.permission_repository.create_permission(input).await?;
        info!(
            permission_id = %permission.id,
            permission_name = %permission.name,
            "permission created"
        );
        Ok(permission)
    }

    /// Applies a partial update to a permission.
    pub async fn update_permission(
        &self,
        permission_id: &str,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let input = UpdatePermissionInput {
            name: input
                .name
                .map(|name| normalize_name(name.as_str(), "permission name"))
                .transpose()?,
            description: input.description.map(normalize_description),
        };

        let permission = self
            .permission_repository
            .update_permission(permission_id, input)
            .await?;
        info!(permission_id = %permission.id, "permission updated");
        Ok(permission)
    }

    /// Deletes a permission and every grant referencing it.
    pub async fn delete_permission(&self, permission_id: &str) -> AppResult<Permission> {
        let permission = self
            .permission_repository
            .delete_permission(permission_id)
            .await?;
        info!(permission_id = %permission.id, "permission deleted");
        Ok(permission)
    }

    /// Lists every permission in insertion order.
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.permission_repository.get_all().await
    }

    /// Finds a permission, returning `None` when it does not exist.
    pub async fn find_permission(&self, permission_id: &str) -> AppResult<Option<Permission>> {
        self.permission_repository
            .get_permission_by_id(permission_id)
            .await
    }
}
