use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rolegrant_application::{CreateRoleInput, SysRoleRepository, UpdateRoleInput};
use rolegrant_core::{AppError, AppResult};
use rolegrant_domain::{Role, new_record_id};

use crate::postgres_errors::{map_write_error, persistence_error};


/// PostgreSQL-backed repository for role rows.
#[derive(Clone)]
pub struct PostgresSysRoleRepository {
    pool: PgPool,
}

impl PostgresSysRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
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
impl SysRoleRepository for PostgresSysRoleRepository {
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO rbac_roles (id, name, description)
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
                "create role",
                format!("role '{}' already exists", input.name),
            )
        })?;

        Ok(row.into())
    }

    async fn update_role(&self, role_id: &str, input: UpdateRoleInput) -> AppResult<Role> {
        let conflict = format!(
            "role '{}' already exists",
            input.name.as_deref().unwrap_or_default()
        );

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE rbac_roles
            SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(role_id)
        .bind(input.name.as_deref())
        .bind(input.description.is_some())
        .bind(input.description.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update role", conflict))?
        .ok_or_else(|| AppError::NotFound(format!("role {role_id} was not found")))?;

        Ok(row.into())
    }

    async fn delete_role(&self, role_id: &str) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            DELETE FROM rbac_roles
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "delete role"))?
        .ok_or_else(|| AppError::NotFound(format!("role {role_id} was not found")))?;

        Ok(row.into())
    }

    async fn get_all(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_roles
            ORDER BY insertion_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "list roles"))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn get_role_by_id(&self, role_id: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM rbac_roles
            WHERE id = $1
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence_error(error, "load role"))?;

        Ok(row.map(Role::from))
    }
}
