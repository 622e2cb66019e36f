use chrono::{DateTime, Utc};
use sprintboard_core::UserId;
use sprintboard_domain::RoleId;

/// Stored association between a user and a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Assigned role.
    pub role_id: RoleId,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Result of an assignment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// A new assignment was written.
    Assigned,
    /// The user already held the role; nothing was written.
    AlreadyAssigned,
}

impl AssignmentOutcome {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::AlreadyAssigned => "already_assigned",
        }
    }
}
