//! Process configuration, read from the environment

use std::env;
use thiserror::Error;

use crate::six::SIX_BASE_URL;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind (`SIX_HOST`)
    pub host: String,
    /// Port to bind (`SIX_PORT`)
    pub port: u16,
    /// Upstream portal (`SIX_BASE_URL`)
    pub six_base_url: String,
    /// Log level for this crate when `RUST_LOG` is unset (`SIX_LOG_LEVEL`)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            six_base_url: SIX_BASE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or empty keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("SIX_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "SIX_PORT",
                    value,
                })?,
            None => defaults.port,
        };

        Ok(Self {
            host: get("SIX_HOST").unwrap_or(defaults.host),
            port,
            six_base_url: get("SIX_BASE_URL").unwrap_or(defaults.six_base_url),
            log_level: get("SIX_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}
