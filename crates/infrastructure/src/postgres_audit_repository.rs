use async_trait::async_trait;
use sqlx::PgPool;

use sprintboard_application::{AuditEvent, AuditRepository};
use sprintboard_core::{AppError, AppResult};

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                actor_id,
                action,
                resource_type,
                resource_id,
                detail
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.actor.map(|actor| actor.as_uuid()))
        .bind(event.action.as_str())
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sprintboard_application::{AuditEvent, AuditRepository};
    use sprintboard_core::UserId;
    use sprintboard_domain::AuditAction;

    use super::PostgresAuditRepository;
    use crate::postgres_test_support::test_pool;

    #[tokio::test]
    async fn appends_events_with_stable_action_names() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repository = PostgresAuditRepository::new(pool.clone());
        let resource_id = UserId::new().to_string();

        let appended = repository
            .append_event(AuditEvent {
                actor: None,
                action: AuditAction::RoleCreated,
                resource_type: "rbac_role".to_owned(),
                resource_id: resource_id.clone(),
                detail: None,
            })
            .await;
        assert!(appended.is_ok());

        let action = sqlx::query_scalar::<_, String>(
            "SELECT action FROM audit_log_entries WHERE resource_id = $1",
        )
        .bind(resource_id)
        .fetch_one(&pool)
        .await;
        assert!(matches!(action, Ok(action) if action == "rbac.role.created"));
    }
}
