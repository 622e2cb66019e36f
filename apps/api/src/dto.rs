mod common;
mod console;
mod permissions;
mod roles;

pub use common::{HealthResponse, PermissionCheckResponse, UserResponse};
pub use console::{ConsoleCommandRequest, ConsoleSnapshotResponse};
pub use permissions::{PermissionGroupResponse, PermissionResponse};
pub use roles::{
    AssignmentOutcomeResponse, CreateRoleRequest, RoleMemberResponse, RoleResponse,
    UpdateRoleRequest,
};
