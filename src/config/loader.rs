//! Configuration loading from the process environment.
//!
//! # Responsibilities
//! - Read recognized variables (`PORT`, `DEV_ENV`, `ORIGIN_URL`, ...)
//! - Resolve the CORS origin (development default vs. configured origin)
//! - Semantic validation (URLs parse, protection service is reachable by
//!   configuration when enabled)
//!
//! # Design Decisions
//! - Missing-but-defaultable variables fall back to `schema` defaults
//! - A missing production origin is a hard error, not a silently broken
//!   CORS policy

use url::Url;

use crate::config::schema::{AppConfig, DEV_ORIGIN};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(port) = env_var("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                message: format!("not a valid port number: {port:?}"),
            })?;
        }
        if let Some(addr) = env_var("BIND_ADDRESS") {
            config.server.bind_address = addr;
        }

        config.cors.origin = resolve_origin(
            env_var("DEV_ENV").as_deref(),
            env_var("ORIGIN_URL").as_deref(),
        )?;

        if let Some(url) = env_var("DATABASE_URL") {
            config.database.url = url;
        }

        if let Some(enabled) = env_var("PROTECTION_ENABLED") {
            config.protection.enabled = parse_bool("PROTECTION_ENABLED", &enabled)?;
        }
        if let Some(url) = env_var("PROTECTION_URL") {
            Url::parse(&url).map_err(|e| ConfigError::Invalid {
                var: "PROTECTION_URL",
                message: e.to_string(),
            })?;
            config.protection.service_url = url;
        }
        if let Some(key) = env_var("PROTECTION_API_KEY") {
            config.protection.api_key = key;
        }
        if let Some(ms) = env_var("PROTECTION_TIMEOUT_MS") {
            config.protection.timeout_ms = ms.parse().map_err(|_| ConfigError::Invalid {
                var: "PROTECTION_TIMEOUT_MS",
                message: format!("not a duration in milliseconds: {ms:?}"),
            })?;
        }
        if config.protection.enabled && config.protection.service_url.is_empty() {
            return Err(ConfigError::Missing("PROTECTION_URL"));
        }

        if let Some(dir) = env_var("STATIC_DIR") {
            config.static_files.dir = dir;
        }

        if let Some(enabled) = env_var("METRICS_ENABLED") {
            config.observability.metrics_enabled = parse_bool("METRICS_ENABLED", &enabled)?;
        }
        if let Some(addr) = env_var("METRICS_ADDR") {
            config.observability.metrics_address = addr;
        }

        Ok(config)
    }
}

/// Resolve the frontend origin the CORS policy allows.
///
/// `DEV_ENV=development` pins the local Vite dev server; anything else
/// requires an explicit, well-formed `ORIGIN_URL`.
pub fn resolve_origin(
    dev_env: Option<&str>,
    origin_url: Option<&str>,
) -> Result<String, ConfigError> {
    if dev_env == Some("development") {
        return Ok(DEV_ORIGIN.to_string());
    }

    let origin = origin_url.ok_or(ConfigError::Missing("ORIGIN_URL"))?;
    Url::parse(origin).map_err(|e| ConfigError::Invalid {
        var: "ORIGIN_URL",
        message: e.to_string(),
    })?;

    Ok(origin.to_string())
}

/// Read a variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            message: format!("expected true/false, got {other:?}"),
        }),
    }
}
