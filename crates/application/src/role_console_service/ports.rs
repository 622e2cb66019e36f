use async_trait::async_trait;

use sprintboard_core::AppResult;

use super::state::{ConsoleSession, ConsoleSessionId};

/// Storage port for per-session console state.
#[async_trait]
pub trait ConsoleSessionRepository: Send + Sync {
    /// Stores a new session.
    async fn create_session(&self, session: ConsoleSession) -> AppResult<()>;

    /// Loads a session by id.
    async fn find_session(&self, session_id: ConsoleSessionId)
    -> AppResult<Option<ConsoleSession>>;

    /// Overwrites a stored session.
    async fn save_session(&self, session: ConsoleSession) -> AppResult<()>;

    /// Removes a session. Returns whether one was removed.
    async fn delete_session(&self, session_id: ConsoleSessionId) -> AppResult<bool>;
}
