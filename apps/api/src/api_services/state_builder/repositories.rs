use std::sync::Arc;

use chrono::Utc;
use sprintboard_application::{
    AuditRepository, ConsoleSessionRepository, RoleAssignmentRepository, RoleRepository,
    UserDirectory,
};
use sprintboard_core::AppError;
use sprintboard_infrastructure::{
    InMemoryAuditRepository, InMemoryConsoleSessionRepository, InMemoryRoleAssignmentRepository,
    InMemoryRoleRepository, InMemoryUserDirectory, PostgresAuditRepository,
    PostgresRoleAssignmentRepository, PostgresRoleRepository, PostgresUserDirectory, fixtures,
};
use sqlx::PgPool;

pub(super) struct RepositorySet {
    pub(super) role_repository: Arc<dyn RoleRepository>,
    pub(super) assignment_repository: Arc<dyn RoleAssignmentRepository>,
    pub(super) user_directory: Arc<dyn UserDirectory>,
    pub(super) audit_repository: Arc<dyn AuditRepository>,
    pub(super) console_session_repository: Arc<dyn ConsoleSessionRepository>,
}

pub(super) fn build_live_repository_set(pool: &PgPool) -> RepositorySet {
    RepositorySet {
        role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
        assignment_repository: Arc::new(PostgresRoleAssignmentRepository::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool.clone())),
        audit_repository: Arc::new(PostgresAuditRepository::new(pool.clone())),
        console_session_repository: Arc::new(InMemoryConsoleSessionRepository::new()),
    }
}

pub(super) fn build_mock_repository_set() -> Result<RepositorySet, AppError> {
    let now = Utc::now();

    Ok(RepositorySet {
        role_repository: Arc::new(InMemoryRoleRepository::with_roles(fixtures::roles(now)?)),
        assignment_repository: Arc::new(InMemoryRoleAssignmentRepository::with_assignments(
            fixtures::assignments(now),
        )),
        user_directory: Arc::new(InMemoryUserDirectory::new(fixtures::users())),
        audit_repository: Arc::new(InMemoryAuditRepository::new()),
        console_session_repository: Arc::new(InMemoryConsoleSessionRepository::new()),
    })
}
