//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits so a config snapshot can be logged or
//! exported; loading itself is environment-sourced (see `loader`).

use serde::{Deserialize, Serialize};

/// Development frontend origin, used when `DEV_ENV=development`.
pub const DEV_ORIGIN: &str = "http://localhost:5174";

/// Root configuration for the backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (port, bind address).
    pub server: ServerConfig,

    /// Cross-origin policy for the frontend.
    pub cors: CorsConfig,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Protection decision service settings.
    pub protection: ProtectionConfig,

    /// Frontend bundle serving settings.
    pub static_files: StaticConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (without port).
    pub bind_address: String,

    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Full socket address string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Cross-origin policy.
///
/// Exactly one origin is allowed and credentialed requests (cookies) are
/// accepted from it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The frontend origin allowed to make credentialed requests.
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: DEV_ORIGIN.to_string(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: String,

    /// Maximum pool size.
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool, in seconds.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost:5432/fitshop".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

/// Protection decision service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Enable the admission check. When disabled, every request passes.
    pub enabled: bool,

    /// Base URL of the hosted decision service.
    pub service_url: String,

    /// API key sent with every decision request.
    pub api_key: String,

    /// Timeout for one decision call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_url: String::new(),
            api_key: String::new(),
            timeout_ms: 1000,
        }
    }
}

/// Frontend bundle serving settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory holding the pre-built frontend bundle.
    pub dir: String,

    /// Entry document served for the bare root path.
    pub entry_document: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            dir: "frontend/dist".to_string(),
            entry_document: "index.html".to_string(),
        }
    }
}

impl StaticConfig {
    /// Path of the entry document inside the bundle directory.
    pub fn entry_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.dir).join(&self.entry_document)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
