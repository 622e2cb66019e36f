mod conversions;
mod types;

pub use types::{
    AssignmentOutcomeResponse, CreateRoleRequest, RoleMemberResponse, RoleResponse,
    UpdateRoleRequest,
};
