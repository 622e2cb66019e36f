use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use sprintboard_core::{AppError, UserId};
use tracing_subscriber::EnvFilter;

/// Backing store selected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// PostgreSQL adapters.
    Live { database_url: String },
    /// In-memory adapters seeded from demo fixtures.
    Mock,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live { .. } => "live",
            Self::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub data_source: DataSource,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    /// User granted the full-access system roles while nobody holds them.
    pub bootstrap_admin: Option<UserId>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let data_source = match lookup("SPRINTBOARD_DATA_SOURCE")
            .unwrap_or_else(|| "live".to_owned())
            .trim()
        {
            "live" => DataSource::Live {
                database_url: required_non_empty(&lookup, "DATABASE_URL")?,
            },
            "mock" => DataSource::Mock,
            other => {
                return Err(AppError::Validation(format!(
                    "SPRINTBOARD_DATA_SOURCE must be either 'live' or 'mock', got '{other}'"
                )));
            }
        };

        if migrate_only && data_source == DataSource::Mock {
            return Err(AppError::Validation(
                "migrate requires SPRINTBOARD_DATA_SOURCE=live".to_owned(),
            ));
        }

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3001,
        };

        let bootstrap_admin = match lookup("SPRINTBOARD_BOOTSTRAP_ADMIN") {
            Some(value) if !value.trim().is_empty() => {
                let user_id = value.trim().parse::<UserId>().map_err(|_| {
                    AppError::Validation(format!("invalid SPRINTBOARD_BOOTSTRAP_ADMIN '{value}'"))
                })?;
                Some(user_id)
            }
            _ => None,
        };

        Ok(Self {
            migrate_only,
            data_source,
            frontend_url,
            api_host,
            api_port,
            bootstrap_admin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
