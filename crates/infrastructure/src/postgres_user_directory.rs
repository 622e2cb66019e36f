use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sprintboard_application::UserDirectory;
use sprintboard_core::{AppError, AppResult, UserId, UserIdentity};

/// PostgreSQL-backed mirror of users owned by the hosted auth provider.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: Option<String>,
}

impl From<UserRow> for UserIdentity {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::from_uuid(row.id), row.email, row.full_name)
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, full_name
            FROM app_users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to find user '{user_id}': {error}")))?;

        Ok(row.map(UserIdentity::from))
    }

    async fn list_users(&self) -> AppResult<Vec<UserIdentity>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, full_name
            FROM app_users
            ORDER BY email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to list users: {error}")))?;

        Ok(rows.into_iter().map(UserIdentity::from).collect())
    }
}
