use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use sprintboard_core::{AppError, AppResult, UserId, UserIdentity};
use sprintboard_domain::{AuditAction, ROLE_ASSIGN, Role, RoleId};

use crate::AuthorizationService;
use crate::access_ports::{
    AssignmentOutcome, AuditEvent, AuditRepository, RoleAssignment, RoleAssignmentRepository,
    RoleRepository, UserDirectory,
};

const ASSIGNMENT_RESOURCE: &str = "rbac_user_role";

/// User holding a role, joined against the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMember {
    /// Assigned user.
    pub user_id: UserId,
    /// Directory entry, absent when the user is no longer known.
    pub user: Option<UserIdentity>,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Application service for user-role associations.
#[derive(Clone)]
pub struct RoleAssignmentService {
    authorization_service: AuthorizationService,
    role_repository: Arc<dyn RoleRepository>,
    assignment_repository: Arc<dyn RoleAssignmentRepository>,
    user_directory: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAssignmentService {
    /// Creates a new role assignment service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        role_repository: Arc<dyn RoleRepository>,
        assignment_repository: Arc<dyn RoleAssignmentRepository>,
        user_directory: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            role_repository,
            assignment_repository,
            user_directory,
            audit_repository,
        }
    }

    /// Assigns a role to a user.
    ///
    /// Assigning a role the user already holds writes nothing and reports
    /// [`AssignmentOutcome::AlreadyAssigned`].
    pub async fn assign_role_to_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<AssignmentOutcome> {
        self.require_role_assign_permission(actor).await?;
        self.require_user(user_id).await?;
        let role = self.require_role(role_id).await?;

        let current = self.get_user_roles(user_id).await?;
        if current.iter().any(|held| held.id() == role_id) {
            info!(user_id = %user_id, role_id = %role_id, "role already assigned");
            return Ok(AssignmentOutcome::AlreadyAssigned);
        }

        self.assignment_repository
            .insert_assignment(RoleAssignment {
                user_id,
                role_id,
                assigned_at: Utc::now(),
            })
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                actor: Some(actor.user_id()),
                action: AuditAction::RoleAssigned,
                resource_type: ASSIGNMENT_RESOURCE.to_owned(),
                resource_id: format!("{user_id}:{role_id}"),
                detail: Some(format!("assigned role '{}' to '{user_id}'", role.name())),
            })
            .await?;

        info!(user_id = %user_id, role_id = %role_id, "role assigned");
        Ok(AssignmentOutcome::Assigned)
    }

    /// Removes a role from a user. Missing associations are not an error.
    pub async fn remove_role_from_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<()> {
        self.require_role_assign_permission(actor).await?;

        let removed = self
            .assignment_repository
            .delete_assignment(user_id, role_id)
            .await?;
        if !removed {
            return Ok(());
        }

        self.audit_repository
            .append_event(AuditEvent {
                actor: Some(actor.user_id()),
                action: AuditAction::RoleUnassigned,
                resource_type: ASSIGNMENT_RESOURCE.to_owned(),
                resource_id: format!("{user_id}:{role_id}"),
                detail: Some(format!("removed role '{role_id}' from '{user_id}'")),
            })
            .await?;

        info!(user_id = %user_id, role_id = %role_id, "role unassigned");
        Ok(())
    }

    /// Gives a user without any assignment every role flagged as default.
    ///
    /// Returns the granted role ids, empty when the user already holds a role.
    pub async fn assign_default_roles(&self, user_id: UserId) -> AppResult<Vec<RoleId>> {
        let held = self
            .assignment_repository
            .list_assignments_for_user(user_id)
            .await?;
        if !held.is_empty() {
            return Ok(Vec::new());
        }

        let defaults: Vec<Role> = self
            .role_repository
            .list_roles()
            .await?
            .into_iter()
            .filter(Role::is_default)
            .collect();
        self.grant_without_actor(user_id, &defaults, "default role")
            .await
    }

    /// Grants the full-access system roles to a user while nobody holds one.
    ///
    /// Once any user holds a full-access system role this is a no-op and
    /// returns an empty list.
    pub async fn bootstrap_admin(&self, user_id: UserId) -> AppResult<Vec<RoleId>> {
        self.require_user(user_id).await?;

        let admin_roles: Vec<Role> = self
            .role_repository
            .list_roles()
            .await?
            .into_iter()
            .filter(|role| role.is_system() && role.permissions().is_wildcard())
            .collect();
        if admin_roles.is_empty() {
            return Err(AppError::NotFound(
                "no full-access system role is defined".to_owned(),
            ));
        }

        for role in &admin_roles {
            let holders = self
                .assignment_repository
                .list_assignments_for_role(role.id())
                .await?;
            if !holders.is_empty() {
                return Ok(Vec::new());
            }
        }

        self.grant_without_actor(user_id, &admin_roles, "bootstrap administrator role")
            .await
    }

    /// Returns the roles a user holds.
    pub async fn get_user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        self.authorization_service.resolve_user_roles(user_id).await
    }

    /// Returns users holding a role, oldest assignment first.
    pub async fn list_role_members(&self, role_id: RoleId) -> AppResult<Vec<RoleMember>> {
        self.require_role(role_id).await?;

        let mut assignments = self
            .assignment_repository
            .list_assignments_for_role(role_id)
            .await?;
        if assignments.is_empty() {
            return Ok(Vec::new());
        }
        assignments.sort_by_key(|assignment| assignment.assigned_at);

        let mut users: HashMap<UserId, UserIdentity> = self
            .user_directory
            .list_users()
            .await?
            .into_iter()
            .map(|user| (user.user_id(), user))
            .collect();

        Ok(assignments
            .into_iter()
            .map(|assignment| RoleMember {
                user_id: assignment.user_id,
                user: users.remove(&assignment.user_id),
                assigned_at: assignment.assigned_at,
            })
            .collect())
    }

    async fn grant_without_actor(
        &self,
        user_id: UserId,
        roles: &[Role],
        reason: &str,
    ) -> AppResult<Vec<RoleId>> {
        let mut granted = Vec::with_capacity(roles.len());
        for role in roles {
            self.assignment_repository
                .insert_assignment(RoleAssignment {
                    user_id,
                    role_id: role.id(),
                    assigned_at: Utc::now(),
                })
                .await?;

            self.audit_repository
                .append_event(AuditEvent {
                    actor: None,
                    action: AuditAction::RoleAssigned,
                    resource_type: ASSIGNMENT_RESOURCE.to_owned(),
                    resource_id: format!("{user_id}:{}", role.id()),
                    detail: Some(format!("granted {reason} '{}' to '{user_id}'", role.name())),
                })
                .await?;

            info!(user_id = %user_id, role_id = %role.id(), reason, "role granted");
            granted.push(role.id());
        }

        Ok(granted)
    }

    async fn require_role_assign_permission(&self, actor: &UserIdentity) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor.user_id(), ROLE_ASSIGN)
            .await
    }

    async fn require_user(&self, user_id: UserId) -> AppResult<UserIdentity> {
        self.user_directory
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    async fn require_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.role_repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }
}
