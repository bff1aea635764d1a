use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rolegrant_application::{
    CreatePermissionInput, SysPermissionRepository, UpdatePermissionInput,
};
use rolegrant_core::{AppError, AppResult};
use rolegrant_domain::{Permission, new_record_id};

use crate::postgres_errors::{map_write_error, persistence_error};

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for permission rows.
#[derive(Clone)]
pub struct PostgresSysPermissionRepository {
    pool: PgPool,
}

impl PostgresSysPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SysPermissionRepository for PostgresSysPermissionRepository {
    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            INSERT INTO rbac_permissions (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(new_record_id())
        .bind(input.name.as_str())
        .bind(input.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                "create permission",
                format!("permission '{}' already exists", input.name),
            )
        })?;

        Ok(row.into())
    }

    async fn update_permission(
        &self,
        permission_id: &str,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let conflict = format!(
            "permission '{}' already exists",
            input.name.as_deref().unwrap_or_default()
        );

        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            UPDATE rbac_permissions
            SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(permission_id)
        .bind(input.name.as_deref())
        .bind(input.description.is_some())
        .bind(input.description.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update permission", conflict))?
        .ok_or_else(|| AppError::NotFound(format!("permission {permission_id} was not found")))?;

        Ok(row.into())
    }

    async fn delete_permission(&self, permission_id: &str) -> AppResult<Permission> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            DELETE FROM rbac_permissions
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "delete permission"))?
        .ok_or_else(|| AppError::NotFound(format!("permission {permission_id} was not found")))?;

        Ok(row.into())
    }

    async fn get_all(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_permissions
            ORDER BY insertion_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "list permissions"))?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }

    async fn get_permission_by_id(&self, permission_id: &str) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_permissions
            WHERE id = $1
            "#,
        )
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "load permission"))?;

        Ok(row.map(Permission::from))
    }
}
