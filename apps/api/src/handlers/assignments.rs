use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use sprintboard_application::AssignmentOutcome;
use sprintboard_core::{UserId, UserIdentity};
use sprintboard_domain::RoleId;
use uuid::Uuid;

use crate::dto::{AssignmentOutcomeResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_user_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .assignment_service
        .get_user_roles(UserId::from_uuid(user_id))
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<AssignmentOutcomeResponse>)> {
    let outcome = state
        .assignment_service
        .assign_role_to_user(&user, UserId::from_uuid(user_id), RoleId::from_uuid(role_id))
        .await?;

    let status = match outcome {
        AssignmentOutcome::Assigned => StatusCode::CREATED,
        AssignmentOutcome::AlreadyAssigned => StatusCode::OK,
    };

    Ok((status, Json(AssignmentOutcomeResponse::from(outcome))))
}

pub async fn remove_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .assignment_service
        .remove_role_from_user(&user, UserId::from_uuid(user_id), RoleId::from_uuid(role_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
