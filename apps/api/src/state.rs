use std::sync::Arc;

use sprintboard_application::{
    AuthorizationService, RoleAssignmentService, RoleConsoleService, RoleService, UserDirectory,
};
use sprintboard_core::UserId;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub role_service: RoleService,
    pub assignment_service: RoleAssignmentService,
    pub console_service: RoleConsoleService,
    pub user_directory: Arc<dyn UserDirectory>,
    pub data_source: &'static str,
    pub bootstrap_admin: Option<UserId>,
}
