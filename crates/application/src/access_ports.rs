mod assignments;
mod audit;
mod repositories;

pub use assignments::{AssignmentOutcome, RoleAssignment};
pub use audit::{AuditEvent, AuditRepository};
pub use repositories::{RoleAssignmentRepository, RoleRepository, UserDirectory};
