use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sprintboard_application::RoleRepository;
use sprintboard_core::{AppError, AppResult};
use sprintboard_domain::{Role, RoleId, RoleRecord};

/// PostgreSQL-backed role repository.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    description: String,
    is_default: bool,
    is_system: bool,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        let id = self.id;
        Role::from_record(RoleRecord {
            id: RoleId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            is_default: self.is_default,
            is_system: self.is_system,
            permissions: self.permissions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
        .map_err(|error| AppError::Store(format!("stored role '{id}' is invalid: {error}")))
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, is_default, is_system, permissions, created_at, updated_at
            FROM roles
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to list roles: {error}")))?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, is_default, is_system, permissions, created_at, updated_at
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to find role '{role_id}': {error}")))?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn insert_role(&self, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO roles (
                id,
                name,
                description,
                is_default,
                is_system,
                permissions,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name())
        .bind(role.description())
        .bind(role.is_default())
        .bind(role.is_system())
        .bind(role.permissions().to_ids())
        .bind(role.created_at())
        .bind(role.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to insert role: {error}")))?;

        Ok(())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2,
                description = $3,
                is_default = $4,
                permissions = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name())
        .bind(role.description())
        .bind(role.is_default())
        .bind(role.permissions().to_ids())
        .bind(role.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to save role: {error}")))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist",
                role.id()
            )));
        }

        Ok(())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Store(format!("failed to delete role: {error}")))?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
