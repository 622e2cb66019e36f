use std::collections::HashSet;
use std::sync::Arc;

use sprintboard_core::{AppError, AppResult, UserId};
use sprintboard_domain::{AccessGuard, Permission, PermissionCatalog, Role};

use crate::access_ports::{RoleAssignmentRepository, RoleRepository};

/// Application service resolving a user's roles and answering permission checks.
#[derive(Clone)]
pub struct AuthorizationService {
    role_repository: Arc<dyn RoleRepository>,
    assignment_repository: Arc<dyn RoleAssignmentRepository>,
    catalog: &'static PermissionCatalog,
}

impl AuthorizationService {
    /// Creates a new authorization service over the standard catalog.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        assignment_repository: Arc<dyn RoleAssignmentRepository>,
    ) -> Self {
        Self {
            role_repository,
            assignment_repository,
            catalog: PermissionCatalog::standard(),
        }
    }

    /// Returns the permission catalog used for effective-permission views.
    #[must_use]
    pub fn catalog(&self) -> &'static PermissionCatalog {
        self.catalog
    }

    /// Joins the user's assignments against stored roles, ordered by role name.
    ///
    /// Assignments whose role no longer exists are skipped.
    pub async fn resolve_user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let assignments = self
            .assignment_repository
            .list_assignments_for_user(user_id)
            .await?;
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let assigned: HashSet<_> = assignments
            .iter()
            .map(|assignment| assignment.role_id)
            .collect();
        let mut roles: Vec<Role> = self
            .role_repository
            .list_roles()
            .await?
            .into_iter()
            .filter(|role| assigned.contains(&role.id()))
            .collect();
        roles.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(roles)
    }

    /// Returns a synchronous guard over the user's current roles.
    pub async fn guard_for(&self, user_id: UserId) -> AppResult<AccessGuard> {
        Ok(AccessGuard::new(self.resolve_user_roles(user_id).await?))
    }

    /// Returns whether any of the user's roles grants the permission.
    pub async fn has_permission(&self, user_id: UserId, permission_id: &str) -> AppResult<bool> {
        Ok(self.guard_for(user_id).await?.allows(permission_id))
    }

    /// Ensures the user holds the permission through at least one role.
    pub async fn require_permission(&self, user_id: UserId, permission_id: &str) -> AppResult<()> {
        if self.has_permission(user_id, permission_id).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing permission '{permission_id}'"
        )))
    }

    /// Returns catalog permissions granted to the user.
    pub async fn effective_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        let guard = self.guard_for(user_id).await?;
        Ok(guard
            .effective_permissions(self.catalog)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests;
