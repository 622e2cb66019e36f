//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod role_assignment_service;
mod role_console_service;
mod role_service;

#[cfg(test)]
mod test_support;

pub use access_ports::{
    AssignmentOutcome, AuditEvent, AuditRepository, RoleAssignment, RoleAssignmentRepository,
    RoleRepository, UserDirectory,
};
pub use authorization_service::AuthorizationService;
pub use role_assignment_service::{RoleAssignmentService, RoleMember};
pub use role_console_service::{
    ConsoleAffordances, ConsoleCommand, ConsoleMember, ConsoleSession, ConsoleSessionId,
    ConsoleSessionRepository, ConsoleSnapshot, ConsoleState, ConsoleView, ConsoleViewKind,
    MAX_NOTIFICATIONS, Notification, NotificationLevel, RoleConsoleService,
};
pub use role_service::RoleService;
