use chrono::{DateTime, SecondsFormat, Utc};
use sprintboard_application::{AssignmentOutcome, RoleMember};
use sprintboard_domain::{Role, RoleDraft, RolePatch};

use crate::dto::UserResponse;

use super::types::{
    AssignmentOutcomeResponse, CreateRoleRequest, RoleMemberResponse, RoleResponse,
    UpdateRoleRequest,
};

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Role> for RoleResponse {
    fn from(value: &Role) -> Self {
        Self {
            role_id: value.id().to_string(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            is_default: value.is_default(),
            is_system: value.is_system(),
            permissions: value.permissions().to_ids(),
            created_at: timestamp(value.created_at()),
            updated_at: timestamp(value.updated_at()),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self::from(&value)
    }
}

impl From<CreateRoleRequest> for RoleDraft {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_default: value.is_default,
            permissions: value.permissions,
        }
    }
}

impl From<RoleDraft> for CreateRoleRequest {
    fn from(value: RoleDraft) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_default: value.is_default,
            permissions: value.permissions,
        }
    }
}

impl From<UpdateRoleRequest> for RolePatch {
    fn from(value: UpdateRoleRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_default: value.is_default,
            permissions: value.permissions,
        }
    }
}

impl From<RolePatch> for UpdateRoleRequest {
    fn from(value: RolePatch) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_default: value.is_default,
            permissions: value.permissions,
        }
    }
}

impl From<RoleMember> for RoleMemberResponse {
    fn from(value: RoleMember) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            user: value.user.map(UserResponse::from),
            assigned_at: timestamp(value.assigned_at),
        }
    }
}

impl From<AssignmentOutcome> for AssignmentOutcomeResponse {
    fn from(value: AssignmentOutcome) -> Self {
        Self {
            outcome: value.as_str().to_owned(),
        }
    }
}
