use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use sprintboard_application::{ConsoleSession, ConsoleSessionId, ConsoleSessionRepository};
use sprintboard_core::{AppError, AppResult};

/// Idle period after which a console session is dropped.
pub const DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES: i64 = 30;

#[derive(Debug)]
struct StoredSession {
    session: ConsoleSession,
    last_seen: DateTime<Utc>,
}

/// Process-local console session store used by both data sources.
///
/// Sessions untouched for longer than the idle timeout are evicted.
#[derive(Debug)]
pub struct InMemoryConsoleSessionRepository {
    sessions: RwLock<HashMap<ConsoleSessionId, StoredSession>>,
    idle_timeout: Duration,
}

impl Default for InMemoryConsoleSessionRepository {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::minutes(DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES))
    }
}

impl InMemoryConsoleSessionRepository {
    /// Creates an empty session store with the default idle timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session store with a custom idle timeout.
    #[must_use]
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Drops every session idle at `now`. Returns how many were dropped.
    pub async fn evict_idle_sessions(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_locked(&mut sessions, now)
    }

    fn evict_locked(
        &self,
        sessions: &mut HashMap<ConsoleSessionId, StoredSession>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, stored| now - stored.last_seen <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "idle console sessions evicted");
        }
        evicted
    }
}

#[async_trait]
impl ConsoleSessionRepository for InMemoryConsoleSessionRepository {
    async fn create_session(&self, session: ConsoleSession) -> AppResult<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        self.evict_locked(&mut sessions, now);
        if sessions.contains_key(&session.id) {
            return Err(AppError::Internal(format!(
                "console session '{}' already exists",
                session.id
            )));
        }

        sessions.insert(
            session.id,
            StoredSession {
                session,
                last_seen: now,
            },
        );
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: ConsoleSessionId,
    ) -> AppResult<Option<ConsoleSession>> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let Some(stored) = sessions.get_mut(&session_id) else {
            return Ok(None);
        };

        if now - stored.last_seen > self.idle_timeout {
            sessions.remove(&session_id);
            return Ok(None);
        }

        stored.last_seen = now;
        Ok(Some(stored.session.clone()))
    }

    async fn save_session(&self, session: ConsoleSession) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        let Some(stored) = sessions.get_mut(&session.id) else {
            return Err(AppError::NotFound(format!(
                "console session '{}' does not exist",
                session.id
            )));
        };

        stored.session = session;
        stored.last_seen = Utc::now();
        Ok(())
    }

    async fn delete_session(&self, session_id: ConsoleSessionId) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(&session_id).is_some())
    }
}
