use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sprintboard_application::{RoleAssignment, RoleAssignmentRepository};
use sprintboard_core::{AppResult, UserId};
use sprintboard_domain::RoleId;

/// In-memory user-role association store keyed by `(user, role)`.
#[derive(Debug, Default)]
pub struct InMemoryRoleAssignmentRepository {
    assignments: RwLock<HashMap<(UserId, RoleId), RoleAssignment>>,
}

impl InMemoryRoleAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with assignments.
    #[must_use]
    pub fn with_assignments(assignments: Vec<RoleAssignment>) -> Self {
        Self {
            assignments: RwLock::new(
                assignments
                    .into_iter()
                    .map(|assignment| ((assignment.user_id, assignment.role_id), assignment))
                    .collect(),
            ),
        }
    }

    async fn matching(&self, keep: impl Fn(&RoleAssignment) -> bool) -> Vec<RoleAssignment> {
        let mut values: Vec<RoleAssignment> = self
            .assignments
            .read()
            .await
            .values()
            .filter(|assignment| keep(assignment))
            .cloned()
            .collect();
        values.sort_by_key(|assignment| assignment.assigned_at);
        values
    }
}

#[async_trait]
impl RoleAssignmentRepository for InMemoryRoleAssignmentRepository {
    async fn list_assignments_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .matching(|assignment| assignment.user_id == user_id)
            .await)
    }

    async fn list_assignments_for_role(&self, role_id: RoleId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .matching(|assignment| assignment.role_id == role_id)
            .await)
    }

    async fn insert_assignment(&self, assignment: RoleAssignment) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .entry((assignment.user_id, assignment.role_id))
            .or_insert(assignment);
        Ok(())
    }

    async fn delete_assignment(&self, user_id: UserId, role_id: RoleId) -> AppResult<bool> {
        Ok(self
            .assignments
            .write()
            .await
            .remove(&(user_id, role_id))
            .is_some())
    }

    async fn delete_assignments_for_role(&self, role_id: RoleId) -> AppResult<u64> {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|(_, stored_role_id), _| *stored_role_id != role_id);

        Ok(u64::try_from(before - assignments.len()).unwrap_or(u64::MAX))
    }
}
