mod conversions;
mod types;

pub use types::{PermissionGroupResponse, PermissionResponse};
