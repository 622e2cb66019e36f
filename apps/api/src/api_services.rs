mod database;
mod state_builder;

pub use database::connect_and_migrate;
pub use state_builder::{build_live_app_state, build_mock_app_state};
