use axum::Json;
use axum::extract::{Extension, Path, State};
use sprintboard_core::UserIdentity;

use crate::dto::{PermissionCheckResponse, PermissionResponse, RoleResponse, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn me_handler(Extension(user): Extension<UserIdentity>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

pub async fn my_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .authorization_service
        .resolve_user_roles(user.user_id())
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .authorization_service
        .effective_permissions(user.user_id())
        .await?;

    Ok(Json(
        permissions.iter().map(PermissionResponse::from).collect(),
    ))
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission_id): Path<String>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let allowed = state
        .authorization_service
        .has_permission(user.user_id(), permission_id.as_str())
        .await?;

    Ok(Json(PermissionCheckResponse {
        permission_id,
        allowed,
    }))
}
