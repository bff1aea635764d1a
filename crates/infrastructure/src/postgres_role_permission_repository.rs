use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rolegrant_application::RolePermissionRepository;
use rolegrant_core::{AppError, AppResult};
use rolegrant_domain::{
    Permission, Role, RolePermission, RolePermissionWithPermission, RolePermissionWithRole,
};

use crate::postgres_errors::{is_foreign_key_violation, map_write_error, persistence_error};

mod listing;


/// PostgreSQL-backed repository for role permission grants.
///
/// Writes are single statements guarded by foreign keys; a violated reference is reported as
/// a validation error naming the missing permission before the missing role.
#[derive(Clone)]
pub struct PostgresRolePermissionRepository {
    pool: PgPool,
}

impl PostgresRolePermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn reference_state(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<ReferenceState> {
        sqlx::query_as::<_, ReferenceState>(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM rbac_permissions WHERE id = $1) AS permission_exists,
                EXISTS (SELECT 1 FROM rbac_roles WHERE id = $2) AS role_exists,
                EXISTS (
                    SELECT 1
                    FROM rbac_role_permissions
                    WHERE permission_id = $1 AND role_id = $2
                ) AS is_assigned
            "#,
        )
        .bind(permission_id)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "resolve role permission references"))
    }

    async fn translate_reference_error(
        &self,
        error: sqlx::Error,
        role_id: &str,
        permission_id: &str,
    ) -> AppError {
        match self.reference_state(role_id, permission_id).await {
            Ok(state) => state
                .missing_reference(role_id, permission_id)
                .unwrap_or_else(|| persistence_error(error, "assign permission to role")),
            Err(lookup_error) => lookup_error,
        }
    }
}

#[derive(Debug, FromRow)]
struct ReferenceState {
    permission_exists: bool,
    role_exists: bool,
    is_assigned: bool,
}

impl ReferenceState {
    fn missing_reference(&self, role_id: &str, permission_id: &str) -> Option<AppError> {
        if !self.permission_exists {
            return Some(missing_permission(permission_id));
        }
        if !self.role_exists {
            return Some(missing_role(role_id));
        }
        None
    }
}

fn missing_permission(permission_id: &str) -> AppError {
    AppError::Validation(format!("permission {permission_id} does not exist"))
}

fn missing_role(role_id: &str) -> AppError {
    AppError::Validation(format!("Role {role_id} does not exist"))
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    permission_id: String,
    role_id: String,
    created_at: DateTime<Utc>,
}

impl From<RolePermissionRow> for RolePermission {
    fn from(row: RolePermissionRow) -> Self {
        Self {
            permission_id: row.permission_id,
            role_id: row.role_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RolePermissionRepository for PostgresRolePermissionRepository {
    async fn assign_permission_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission> {
        let result = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            INSERT INTO rbac_role_permissions (permission_id, role_id)
            VALUES ($1, $2)
            RETURNING permission_id, role_id, created_at
            "#,
        )
        .bind(permission_id)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(error) if is_foreign_key_violation(&error) => Err(self
                .translate_reference_error(error, role_id, permission_id)
                .await),
            Err(error) => Err(map_write_error(
                error,
                "assign permission to role",
                format!("permission {permission_id} is already assigned to role {role_id}"),
            )),
        }
    }

    async fn remove_permission_from_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<RolePermission> {
        let row = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            DELETE FROM rbac_role_permissions
            WHERE permission_id = $1 AND role_id = $2
            RETURNING permission_id, role_id, created_at
            "#,
        )
        .bind(permission_id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "remove permission from role"))?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        let state = self.reference_state(role_id, permission_id).await?;
        Err(state
            .missing_reference(role_id, permission_id)
            .unwrap_or_else(|| {
                AppError::NotFound(format!(
                    "permission {permission_id} is not assigned to role {role_id}"
                ))
            }))
    }

    async fn get_permissions_by_role(
        &self,
        role_id: &str,
    ) -> AppResult<Vec<RolePermissionWithPermission>> {
        self.list_permissions_for_role(role_id).await
    }

    async fn get_roles_in_permission(
        &self,
        permission_id: &str,
    ) -> AppResult<Vec<RolePermissionWithRole>> {
        self.list_roles_for_permission(permission_id).await
    }

    async fn is_permission_assigned_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> AppResult<bool> {
        let state = self.reference_state(role_id, permission_id).await?;
        match state.missing_reference(role_id, permission_id) {
            Some(error) => Err(error),
            None => Ok(state.is_assigned),
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignedPermissionRow {
    permission_id: String,
    role_id: String,
    assigned_at: DateTime<Utc>,
    permission_name: String,
    permission_description: Option<String>,
    permission_created_at: DateTime<Utc>,
    permission_updated_at: DateTime<Utc>,
}

impl From<AssignedPermissionRow> for RolePermissionWithPermission {
    fn from(row: AssignedPermissionRow) -> Self {
        Self {
            assignment: RolePermission {
                permission_id: row.permission_id.clone(),
                role_id: row.role_id,
                created_at: row.assigned_at,
            },
            permission: Permission {
                id: row.permission_id,
                name: row.permission_name,
                description: row.permission_description,
                created_at: row.permission_created_at,
                updated_at: row.permission_updated_at,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignedRoleRow {
    permission_id: String,
    role_id: String,
    assigned_at: DateTime<Utc>,
    role_name: String,
    role_description: Option<String>,
    role_created_at: DateTime<Utc>,
    role_updated_at: DateTime<Utc>,
}

impl From<AssignedRoleRow> for RolePermissionWithRole {
    fn from(row: AssignedRoleRow) -> Self {
        Self {
            assignment: RolePermission {
                permission_id: row.permission_id,
                role_id: row.role_id.clone(),
                created_at: row.assigned_at,
            },
            role: Role {
                id: row.role_id,
                name: row.role_name,
                description: row.role_description,
                created_at: row.role_created_at,
                updated_at: row.role_updated_at,
            },
        }
    }
}
