use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use sprintboard_core::{AppError, AppResult, UserIdentity};
use sprintboard_domain::{AuditAction, ROLE_MANAGE, Role, RoleDraft, RoleId, RolePatch};

use crate::AuthorizationService;
use crate::access_ports::{AuditEvent, AuditRepository, RoleAssignmentRepository, RoleRepository};

const ROLE_RESOURCE: &str = "rbac_role";

/// Application service owning role CRUD.
#[derive(Clone)]
pub struct RoleService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RoleRepository>,
    assignment_repository: Arc<dyn RoleAssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    last_listing: Arc<RwLock<Vec<Role>>>,
}

impl RoleService {
    /// Creates a new role service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RoleRepository>,
        assignment_repository: Arc<dyn RoleAssignmentRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            assignment_repository,
            audit_repository,
            last_listing: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Lists roles ordered by name.
    ///
    /// A failing repository is logged and answered with the last successful
    /// listing, which is empty until one succeeds.
    pub async fn list_roles(&self) -> Vec<Role> {
        match self.repository.list_roles().await {
            Ok(mut roles) => {
                roles.sort_by(|left, right| left.name().cmp(right.name()));
                *self.last_listing.write().await = roles.clone();
                roles
            }
            Err(error) => {
                warn!(error = %error, "role listing failed, serving last known roles");
                self.last_listing.read().await.clone()
            }
        }
    }

    /// Returns one role by id.
    pub async fn find_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Creates a custom role and emits an audit event.
    pub async fn create_role(&self, actor: &UserIdentity, draft: RoleDraft) -> AppResult<Role> {
        self.require_role_manage_permission(actor).await?;

        let role = draft.commit(Utc::now())?;
        self.warn_on_unknown_permissions(&role);
        self.repository.insert_role(role.clone()).await?;

        self.audit_repository
            .append_event(AuditEvent {
                actor: Some(actor.user_id()),
                action: AuditAction::RoleCreated,
                resource_type: ROLE_RESOURCE.to_owned(),
                resource_id: role.id().to_string(),
                detail: Some(format!("created role '{}'", role.name())),
            })
            .await?;

        info!(role_id = %role.id(), role_name = role.name(), "role created");
        Ok(role)
    }

    /// Merges a patch into an existing role and emits an audit event.
    ///
    /// An empty patch returns the stored role without writing or auditing.
    pub async fn update_role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        patch: RolePatch,
    ) -> AppResult<Role> {
        self.require_role_manage_permission(actor).await?;

        let existing = self.find_role(role_id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = existing.apply(patch, Utc::now())?;
        self.warn_on_unknown_permissions(&updated);
        self.repository.save_role(updated.clone()).await?;

        self.audit_repository
            .append_event(AuditEvent {
                actor: Some(actor.user_id()),
                action: AuditAction::RoleUpdated,
                resource_type: ROLE_RESOURCE.to_owned(),
                resource_id: role_id.to_string(),
                detail: Some(format!("updated role '{}'", updated.name())),
            })
            .await?;

        info!(role_id = %role_id, role_name = updated.name(), "role updated");
        Ok(updated)
    }

    /// Deletes a custom role together with its assignments.
    ///
    /// System roles are rejected with [`AppError::Forbidden`] and stay listed.
    pub async fn delete_role(&self, actor: &UserIdentity, role_id: RoleId) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        let existing = self.find_role(role_id).await?;
        if existing.is_system() {
            return Err(AppError::Forbidden(format!(
                "system role '{}' cannot be deleted",
                existing.name()
            )));
        }

        if !self.repository.delete_role(role_id).await? {
            return Err(AppError::NotFound(format!(
                "role '{role_id}' does not exist"
            )));
        }
        let removed_assignments = self
            .assignment_repository
            .delete_assignments_for_role(role_id)
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                actor: Some(actor.user_id()),
                action: AuditAction::RoleDeleted,
                resource_type: ROLE_RESOURCE.to_owned(),
                resource_id: role_id.to_string(),
                detail: Some(format!(
                    "deleted role '{}' and {removed_assignments} assignment(s)",
                    existing.name()
                )),
            })
            .await?;

        info!(
            role_id = %role_id,
            removed_assignments,
            "role deleted"
        );
        Ok(())
    }

    async fn require_role_manage_permission(&self, actor: &UserIdentity) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor.user_id(), ROLE_MANAGE)
            .await
    }

    fn warn_on_unknown_permissions(&self, role: &Role) {
        let unknown = role
            .permissions()
            .unknown_ids(self.authorization_service.catalog());
        if !unknown.is_empty() {
            warn!(
                role_name = role.name(),
                unknown = ?unknown,
                "role grants permission ids missing from the catalog"
            );
        }
    }
}

#[cfg(test)]
mod tests;
