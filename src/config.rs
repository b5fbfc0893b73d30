//! Environment configuration

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::pricing::distance;

pub const DEFAULT_BUSINESS_ADDRESS: &str = "123 Business St, Your City, ST 12345";

/// Configuration errors raised at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Application settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub google_maps_api_key: Option<String>,
    pub business_address: String,
    pub distance_api_base_url: String,
    pub distance_timeout: Duration,
}

impl AppConfig {
    /// Load from process environment. Call `dotenvy::dotenv()` first to honour `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?;
        let port = parse_or(&get, "APP_PORT", 3000)?;
        let timeout_secs: u64 = parse_or(&get, "DISTANCE_TIMEOUT_SECS", distance::DEFAULT_TIMEOUT.as_secs())?;

        Ok(Self {
            database_url,
            database_max_connections,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level: get("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            google_maps_api_key: get("GOOGLE_MAPS_API_KEY"),
            business_address: get("BUSINESS_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BUSINESS_ADDRESS.to_string()),
            distance_api_base_url: get("DISTANCE_API_BASE_URL")
                .unwrap_or_else(|| distance::DEFAULT_BASE_URL.to_string()),
            distance_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::Invalid {
            name: "APP_HOST",
            value: self.host.clone(),
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
