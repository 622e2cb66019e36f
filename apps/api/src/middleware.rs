use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use sprintboard_core::{AppError, AppResult, UserId, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the caller id, set by the hosted auth proxy.
pub const USER_HEADER: &str = "x-sprintboard-user";

pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = resolve_caller(&state, request.headers()).await?;
    grant_initial_roles(&state, identity.user_id()).await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> AppResult<UserIdentity> {
    let user_id = headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?
        .parse::<UserId>()
        .map_err(|_| AppError::Unauthorized(format!("malformed {USER_HEADER} header")))?;

    state
        .user_directory
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown user '{user_id}'")))
}

/// Grants the bootstrap administrator and default roles on first contact.
async fn grant_initial_roles(state: &AppState, user_id: UserId) -> AppResult<()> {
    if state.bootstrap_admin == Some(user_id) {
        state.assignment_service.bootstrap_admin(user_id).await?;
    }
    state.assignment_service.assign_default_roles(user_id).await?;
    Ok(())
}
