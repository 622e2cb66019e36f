use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::UserResponse;

/// Incoming payload for role creation. Also echoes the create form in console views.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Incoming partial role update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role_id: String,
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub is_system: bool,
    /// Permission ids, or `["*"]` for full access.
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// User holding a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-member-response.ts"
)]
pub struct RoleMemberResponse {
    pub user_id: String,
    /// Missing when the assignment points at a user the directory no longer knows.
    pub user: Option<UserResponse>,
    pub assigned_at: String,
}

/// Result of an assignment request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-outcome-response.ts"
)]
pub struct AssignmentOutcomeResponse {
    pub outcome: String,
}
