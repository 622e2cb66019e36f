use async_trait::async_trait;
use sprintboard_core::{AppResult, UserId};
use sprintboard_domain::AuditAction;

/// Record of one role or assignment change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// User that performed the action, when known.
    pub actor: Option<UserId>,
    /// What happened.
    pub action: AuditAction,
    /// Table-like label of the touched resource, e.g. `rbac_role`.
    pub resource_type: String,
    /// Id of the touched resource.
    pub resource_id: String,
    /// Human-readable summary.
    pub detail: Option<String>,
}

/// Append-only audit trail.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
