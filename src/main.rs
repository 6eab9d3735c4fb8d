//! Fitshop backend server binary.
//!
//! Loads configuration from the environment (with `.env` support), brings
//! up the admission pipeline, and serves the API plus the pre-built
//! frontend bundle.

use fitshop_backend::config::AppConfig;
use fitshop_backend::lifecycle::{startup, Shutdown};
use fitshop_backend::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init();

    tracing::info!("fitshop-backend v0.1.0 starting");

    let config = AppConfig::from_env()?;

    tracing::info!(
        port = config.server.port,
        origin = %config.cors.origin,
        protection_enabled = config.protection.enabled,
        static_dir = %config.static_files.dir,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    startup::run(config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
