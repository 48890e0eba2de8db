use std::net::SocketAddr;

use thiserror::Error;

pub const ADDR_ENV: &str = "TODO_API_ADDR";
pub const BASE_URL_ENV: &str = "TODO_API_BASE_URL";
pub const DEFAULT_ADDR: &str = "127.0.0.1:5153";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5153";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads the server settings from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr { var: ADDR_ENV, value })?;
        Ok(Self { addr })
    }
}

pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .try_init();
}
