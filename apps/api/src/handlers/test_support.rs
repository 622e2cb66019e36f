use sprintboard_core::UserIdentity;
use sprintboard_infrastructure::fixtures;

use crate::api_services::build_mock_app_state;
use crate::state::AppState;

/// Demo admin holding the wildcard role.
pub(crate) const ADA: &str = "ada@sprintboard.dev";
/// Demo project manager, may read but not manage roles.
pub(crate) const GRACE: &str = "grace@sprintboard.dev";
/// Demo viewer.
pub(crate) const MARGARET: &str = "margaret@sprintboard.dev";

pub(crate) fn mock_state() -> AppState {
    let Ok(state) = build_mock_app_state(None) else {
        panic!("mock state should build from fixtures");
    };
    state
}

pub(crate) fn demo_user(email: &str) -> UserIdentity {
    let Some(user) = fixtures::users()
        .into_iter()
        .find(|user| user.email() == email)
    else {
        panic!("fixture user '{email}' should exist");
    };
    user
}
