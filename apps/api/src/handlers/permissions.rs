use axum::Json;
use axum::extract::State;

use crate::dto::{PermissionGroupResponse, PermissionResponse};
use crate::state::AppState;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> Json<Vec<PermissionResponse>> {
    let permissions = state
        .authorization_service
        .catalog()
        .list_permissions()
        .iter()
        .map(PermissionResponse::from)
        .collect();

    Json(permissions)
}

pub async fn grouped_permissions_handler(
    State(state): State<AppState>,
) -> Json<Vec<PermissionGroupResponse>> {
    let groups = state
        .authorization_service
        .catalog()
        .grouped_by_category()
        .into_iter()
        .map(PermissionGroupResponse::from)
        .collect();

    Json(groups)
}
