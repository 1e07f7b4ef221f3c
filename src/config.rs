//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration parameters.
///
/// Everything except the JWT secret has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval between reaper sweeps of the session cache
    pub reap_interval: Duration,
    /// Lifetime of issued access tokens
    pub access_token_ttl: Duration,
    /// Lifetime of issued refresh-token sessions
    pub refresh_token_ttl: Duration,
    /// HMAC secret for signing access tokens
    pub jwt_secret: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REAP_INTERVAL_SECS` - Reaper period in seconds (default: 60)
    /// - `ACCESS_TOKEN_TTL_SECS` - Access token lifetime (default: 900)
    /// - `REFRESH_TOKEN_TTL_SECS` - Session lifetime (default: 2592000)
    /// - `JWT_SECRET` - Signing secret (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        Ok(Self {
            server_port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            reap_interval: parse_var("REAP_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.reap_interval),
            access_token_ttl: parse_var("ACCESS_TOKEN_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.access_token_ttl),
            refresh_token_ttl: parse_var("REFRESH_TOKEN_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_token_ttl),
            jwt_secret,
        })
    }
}

/// Reads and parses an optional variable. Unset is `None`; garbage is an error.
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            reap_interval: Duration::from_secs(60),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(43_200 * 60),
            jwt_secret: "development-secret".to_string(),
        }
    }
}
