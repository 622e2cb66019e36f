use sprintboard_application::{
    AuthorizationService, RoleAssignmentService, RoleConsoleService, RoleService,
};
use sprintboard_core::{AppError, UserId};
use sqlx::PgPool;
use tracing::info;

use crate::state::AppState;

mod repositories;

use repositories::RepositorySet;

pub fn build_live_app_state(pool: PgPool, bootstrap_admin: Option<UserId>) -> AppState {
    build_app_state(
        repositories::build_live_repository_set(&pool),
        "live",
        bootstrap_admin,
    )
}

pub fn build_mock_app_state(bootstrap_admin: Option<UserId>) -> Result<AppState, AppError> {
    info!("serving in-memory demo data");
    Ok(build_app_state(
        repositories::build_mock_repository_set()?,
        "mock",
        bootstrap_admin,
    ))
}

fn build_app_state(
    repositories: RepositorySet,
    data_source: &'static str,
    bootstrap_admin: Option<UserId>,
) -> AppState {
    let authorization_service = AuthorizationService::new(
        repositories.role_repository.clone(),
        repositories.assignment_repository.clone(),
    );
    let role_service = RoleService::new(
        authorization_service.clone(),
        repositories.role_repository.clone(),
        repositories.assignment_repository.clone(),
        repositories.audit_repository.clone(),
    );
    let assignment_service = RoleAssignmentService::new(
        authorization_service.clone(),
        repositories.role_repository,
        repositories.assignment_repository,
        repositories.user_directory.clone(),
        repositories.audit_repository,
    );
    let console_service = RoleConsoleService::new(
        authorization_service.clone(),
        role_service.clone(),
        assignment_service.clone(),
        repositories.console_session_repository,
    );

    AppState {
        authorization_service,
        role_service,
        assignment_service,
        console_service,
        user_directory: repositories.user_directory,
        data_source,
        bootstrap_admin,
    }
}
