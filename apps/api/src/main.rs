//! Sprintboard access-control API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use sprintboard_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, DataSource, init_tracing};
use crate::api_services::{build_live_app_state, build_mock_app_state, connect_and_migrate};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app_state = match &config.data_source {
        DataSource::Live { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            if config.migrate_only {
                info!("migrations applied successfully");
                return Ok(());
            }
            build_live_app_state(pool, config.bootstrap_admin)
        }
        DataSource::Mock => build_mock_app_state(config.bootstrap_admin)?,
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(
        %address,
        data_source = config.data_source.as_str(),
        "sprintboard-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
