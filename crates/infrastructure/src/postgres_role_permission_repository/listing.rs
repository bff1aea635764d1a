use super::*;

impl PostgresRolePermissionRepository {
    pub(super) async fn list_permissions_for_role(
        &self,
        role_id: &str,
    ) -> AppResult<Vec<RolePermissionWithPermission>> {
        let role_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM rbac_roles WHERE id = $1)",
        )
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "resolve role"))?;

        if !role_exists {
            return Err(missing_role(role_id));
        }

        let rows = sqlx::query_as::<_, AssignedPermissionRow>(
            r#"
            SELECT
                grants.permission_id,
                grants.role_id,
                grants.created_at AS assigned_at,
                permissions.name AS permission_name,
                permissions.description AS permission_description,
                permissions.created_at AS permission_created_at,
                permissions.updated_at AS permission_updated_at
            FROM rbac_role_permissions AS grants
            INNER JOIN rbac_permissions AS permissions
                ON permissions.id = grants.permission_id
            WHERE grants.role_id = $1
            ORDER BY grants.created_at, permissions.insertion_order
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "list role permissions"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_roles_for_permission(
        &self,
        permission_id: &str,
    ) -> AppResult<Vec<RolePermissionWithRole>> {
        let permission_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM rbac_permissions WHERE id = $1)",
        )
        .bind(permission_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "resolve permission"))?;

        if !permission_exists {
            return Err(missing_permission(permission_id));
        }

        let rows = sqlx::query_as::<_, AssignedRoleRow>(
            r#"
            SELECT
                grants.permission_id,
                grants.role_id,
                grants.created_at AS assigned_at,
                roles.name AS role_name,
                roles.description AS role_description,
                roles.created_at AS role_created_at,
                roles.updated_at AS role_updated_at
            FROM rbac_role_permissions AS grants
            INNER JOIN rbac_roles AS roles
                ON roles.id = grants.role_id
            WHERE grants.permission_id = $1
            ORDER BY grants.created_at, roles.insertion_order
            "#,
        )
        .bind(permission_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "list permission roles"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
