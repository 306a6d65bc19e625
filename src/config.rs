use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "@storefront:cart";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub inventory_url: String,
    pub inventory_timeout: Duration,
    /// Postgres snapshot storage; in-memory storage is used when absent.
    pub database_url: Option<String>,
    pub storage_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value: raw,
            })?,
            None => 8080,
        };
        let timeout_secs: u64 = match lookup("INVENTORY_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "INVENTORY_TIMEOUT_SECS",
                expected: "number of seconds",
                value: raw,
            })?,
            None => 10,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            inventory_url: lookup("INVENTORY_URL").ok_or(ConfigError::Missing("INVENTORY_URL"))?,
            inventory_timeout: Duration::from_secs(timeout_secs),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            storage_key: lookup("CART_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        })
    }
}
