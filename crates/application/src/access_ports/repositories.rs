use async_trait::async_trait;

use sprintboard_core::{AppResult, UserId, UserIdentity};
use sprintboard_domain::{Role, RoleId};

use super::assignments::RoleAssignment;

/// Repository port for role persistence.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists every role.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Finds one role by id.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Persists a newly created role.
    async fn insert_role(&self, role: Role) -> AppResult<()>;

    /// Overwrites an existing role.
    async fn save_role(&self, role: Role) -> AppResult<()>;

    /// Removes a role. Returns whether a row was removed.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool>;
}

/// Repository port for user-role associations.
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Lists assignments held by a user.
    async fn list_assignments_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>>;

    /// Lists assignments referencing a role.
    async fn list_assignments_for_role(&self, role_id: RoleId) -> AppResult<Vec<RoleAssignment>>;

    /// Writes one assignment.
    async fn insert_assignment(&self, assignment: RoleAssignment) -> AppResult<()>;

    /// Removes one assignment. Returns whether a row was removed.
    async fn delete_assignment(&self, user_id: UserId, role_id: RoleId) -> AppResult<bool>;

    /// Removes every assignment referencing a role. Returns removed rows.
    async fn delete_assignments_for_role(&self, role_id: RoleId) -> AppResult<u64>;
}

/// Read-only port onto users owned by the hosted authentication provider.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds one user by id.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserIdentity>>;

    /// Lists known users.
    async fn list_users(&self) -> AppResult<Vec<UserIdentity>>;
}
