use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use sprintboard_application::{ConsoleCommand, ConsoleSessionId};
use sprintboard_core::UserIdentity;
use uuid::Uuid;

use crate::dto::{ConsoleCommandRequest, ConsoleSnapshotResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn open_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<(StatusCode, Json<ConsoleSnapshotResponse>)> {
    let snapshot = state.console_service.open_session(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ConsoleSnapshotResponse::from(snapshot)),
    ))
}

pub async fn session_snapshot_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<ConsoleSnapshotResponse>> {
    let snapshot = state
        .console_service
        .snapshot(&user, ConsoleSessionId::from_uuid(session_id))
        .await?;

    Ok(Json(ConsoleSnapshotResponse::from(snapshot)))
}

/// Applies one command. Command failures come back inside the snapshot.
pub async fn dispatch_command_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ConsoleCommandRequest>,
) -> ApiResult<Json<ConsoleSnapshotResponse>> {
    let command = ConsoleCommand::try_from(payload)?;
    let snapshot = state
        .console_service
        .dispatch(&user, ConsoleSessionId::from_uuid(session_id), command)
        .await?;

    Ok(Json(ConsoleSnapshotResponse::from(snapshot)))
}

pub async fn close_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .console_service
        .close_session(&user, ConsoleSessionId::from_uuid(session_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
