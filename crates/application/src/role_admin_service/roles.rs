use tracing::info;

use rolegrant_core::AppResult;
use rolegrant_domain::Role;

use crate::security_ports::{CreateRoleInput, UpdateRoleInput};

use super::{RoleAdminService, normalize_description, normalize_name};

impl RoleAdminService {
    /// Creates a role with a trimmed, non-empty name.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let input = CreateRoleInput {
            name: normalize_name(input.name.as_str(), "role name")?,
            description: normalize_description(input.description),
        };

        let role = self.role_repository.create_role(input).await?;
        info!(role_id = %role.id, role_name = %role.name, "role created");
        Ok(role)
    }

    /// Applies a partial update to a role.
    pub async fn update_role(&self, role_id: &str, input: UpdateRoleInput) -> AppResult<Role> {
        let input = UpdateRoleInput {
            name: input
                .name
                .map(|name| normalize_name(name.as_str(), "role name"))
                .transpose()?,
            description: input.description.map(normalize_description),
        };

        let role = self.role_repository.update_role(role_id, input).await?;
        info!(role_id = %role.id, "role updated");
        Ok(role)
    }

    /// Deletes a role together with its permission grants.
    pub async fn delete_role(&self, role_id: &str) -> AppResult<Role> {
        let role = self.role_repository.delete_role(role_id).await?;
        info!(role_id = %role.id, role_name = %role.name, "role deleted");
        Ok(role)
    }

    /// Lists every role in insertion order.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.role_repository.get_all().await
    }

    /// Finds a role, returning `None` when it does not exist.
    pub async fn find_role(&self, role_id: &str) -> AppResult<Option<Role>> {
        self.role_repository.get_role_by_id(role_id).await
    }
}
