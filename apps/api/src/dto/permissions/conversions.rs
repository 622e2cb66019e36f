use sprintboard_domain::{Permission, PermissionCategory};

use super::types::{PermissionGroupResponse, PermissionResponse};

impl From<&Permission> for PermissionResponse {
    fn from(value: &Permission) -> Self {
        Self {
            id: value.id().to_owned(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            category: value.category().as_str().to_owned(),
            action: value.action().as_str().to_owned(),
        }
    }
}

impl From<(PermissionCategory, Vec<&Permission>)> for PermissionGroupResponse {
    fn from((category, permissions): (PermissionCategory, Vec<&Permission>)) -> Self {
        Self {
            category: category.as_str().to_owned(),
            permissions: permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}
