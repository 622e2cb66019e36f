use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sprintboard_application::RoleRepository;
use sprintboard_core::{AppError, AppResult};
use sprintboard_domain::{Role, RoleId};

/// In-memory role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with roles.
    #[must_use]
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: RwLock::new(roles.into_iter().map(|role| (role.id(), role)).collect()),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(&role_id).cloned())
    }

    async fn insert_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.id()) {
            return Err(AppError::Store(format!(
                "role '{}' already exists",
                role.id()
            )));
        }

        roles.insert(role.id(), role);
        Ok(())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        let Some(stored) = roles.get_mut(&role.id()) else {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist",
                role.id()
            )));
        };

        *stored = role;
        Ok(())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        Ok(self.roles.write().await.remove(&role_id).is_some())
    }
}
