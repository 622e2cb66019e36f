use async_trait::async_trait;

use sprintboard_application::UserDirectory;
use sprintboard_core::{AppResult, UserId, UserIdentity};

/// Fixed user directory for the mock data source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<UserIdentity>,
}

impl InMemoryUserDirectory {
    /// Creates a directory over the given users.
    #[must_use]
    pub fn new(users: Vec<UserIdentity>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.user_id() == user_id)
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<UserIdentity>> {
        let mut users = self.users.clone();
        users.sort_by(|left, right| left.email().cmp(right.email()));
        Ok(users)
    }
}
