use sprintboard_core::UserIdentity;

use super::types::UserResponse;

impl From<UserIdentity> for UserResponse {
    fn from(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            email: identity.email().to_owned(),
            full_name: identity.full_name().map(ToOwned::to_owned),
            display_name: identity.display_name().to_owned(),
        }
    }
}
