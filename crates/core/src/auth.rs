use serde::{Deserialize, Serialize};

use crate::UserId;

/// User known to the hosted authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    email: String,
    full_name: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from provider data.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            full_name,
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the full name, if the user provided one.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the full name, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name().unwrap_or(self.email.as_str())
    }
}
