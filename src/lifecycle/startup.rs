//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start the metrics exporter when enabled
//! - Bind the listener and begin accepting traffic last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and the process never reaches
//!   the listening state
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::db::{self, DbError};
use crate::http::server::{AppState, HttpServer, ServerError};
use crate::observability::metrics;
use crate::protection::{HttpOracle, OracleError, ProtectionOracle};
use crate::routes::ApiRouters;

/// Error type for startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("failed to build protection client: {0}")]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

/// Bring the whole service up and serve until shutdown.
///
/// The listener binds only after every other subsystem initialized
/// successfully; a database failure here means the port is never opened.
pub async fn run(config: AppConfig, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Database first: a failed init must keep the listener closed.
    let pool = db::init(&config.database).await?;

    let oracle: Arc<dyn ProtectionOracle> = Arc::new(HttpOracle::new(&config.protection)?);

    let config = Arc::new(config);
    let state = AppState {
        pool,
        oracle,
        config: config.clone(),
    };
    let server = HttpServer::new(&config, state, ApiRouters::app_defaults())?;

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(address = %addr, "Listening for connections");

    server.run(listener, shutdown).await?;
    Ok(())
}
