use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use sprintboard_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler),
        )
        .route(
            "/api/permissions/grouped",
            get(handlers::permissions::grouped_permissions_handler),
        )
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::roles::get_role_handler)
                .patch(handlers::roles::update_role_handler)
                .delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/roles/{role_id}/assignments",
            get(handlers::roles::list_role_members_handler),
        )
        .route(
            "/api/users/{user_id}/roles",
            get(handlers::assignments::list_user_roles_handler),
        )
        .route(
            "/api/users/{user_id}/roles/{role_id}",
            put(handlers::assignments::assign_role_handler)
                .delete(handlers::assignments::remove_role_handler),
        )
        .route("/api/me", get(handlers::me::me_handler))
        .route("/api/me/roles", get(handlers::me::my_roles_handler))
        .route(
            "/api/me/permissions",
            get(handlers::me::my_permissions_handler),
        )
        .route(
            "/api/me/permissions/{permission_id}",
            get(handlers::me::check_permission_handler),
        )
        .route(
            "/api/console/sessions",
            post(handlers::console::open_session_handler),
        )
        .route(
            "/api/console/sessions/{session_id}",
            get(handlers::console::session_snapshot_handler)
                .delete(handlers::console::close_session_handler),
        )
        .route(
            "/api/console/sessions/{session_id}/commands",
            post(handlers::console::dispatch_command_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_user,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
