//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

pub mod fixtures;

mod in_memory_audit_repository;
mod in_memory_console_session_repository;
mod in_memory_role_assignment_repository;
mod in_memory_role_repository;
mod in_memory_user_directory;
mod postgres_audit_repository;
mod postgres_role_assignment_repository;
mod postgres_role_repository;
mod postgres_user_directory;

#[cfg(test)]
mod postgres_test_support;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_console_session_repository::InMemoryConsoleSessionRepository;
pub use in_memory_role_assignment_repository::InMemoryRoleAssignmentRepository;
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_role_assignment_repository::PostgresRoleAssignmentRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_directory::PostgresUserDirectory;
