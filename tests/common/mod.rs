//! Shared utilities for integration testing.

use async_trait::async_trait;
use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use fitshop_backend::config::AppConfig;
use fitshop_backend::http::server::{AppState, HttpServer};
use fitshop_backend::lifecycle::Shutdown;
use fitshop_backend::protection::{
    OracleError, ProtectionDecision, ProtectionOracle, RequestFacts,
};
use fitshop_backend::routes::ApiRouters;

/// Oracle that always answers with the same canned outcome.
pub struct StaticOracle {
    decision: Option<ProtectionDecision>,
}

impl StaticOracle {
    /// Always answer with the given decision.
    pub fn with(decision: ProtectionDecision) -> Arc<Self> {
        Arc::new(Self {
            decision: Some(decision),
        })
    }

    /// Always fail as if the decision service were unreachable.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self { decision: None })
    }
}

#[async_trait]
impl ProtectionOracle for StaticOracle {
    async fn evaluate(
        &self,
        _facts: &RequestFacts,
        _requested: u32,
    ) -> Result<ProtectionDecision, OracleError> {
        match &self.decision {
            Some(d) => Ok(d.clone()),
            None => Err(OracleError::Status(503)),
        }
    }
}

/// Config pointing at a prepared static dir, protection enabled.
///
/// The database pool is built lazily and never touched unless a handler
/// queries it, so no live Postgres is needed.
pub fn test_config(static_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.static_files.dir = static_dir.to_string_lossy().into_owned();
    config.protection.enabled = true;
    config
}

/// Probe route groups that identify themselves, for dispatch assertions.
pub fn probe_api() -> ApiRouters {
    ApiRouters {
        products: Router::new().route("/", get(|| async { "products-group" })),
        user: Router::new().route("/", get(|| async { "user-group" })),
        workout: Router::new().route("/", get(|| async { "workout-group" })),
    }
}

/// Write an entry document and one asset into `dir`.
pub fn populate_static_dir(dir: &Path) {
    std::fs::write(dir.join("index.html"), "<html>fitshop entry</html>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('bundle')").unwrap();
}

/// Start the full pipeline on an ephemeral port.
///
/// Returns the bound address and the shutdown coordinator; dropping the
/// coordinator without triggering leaves cleanup to the runtime teardown.
pub async fn spawn_app(
    mut config: AppConfig,
    oracle: Arc<dyn ProtectionOracle>,
    api: ApiRouters,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.server.bind_address = addr.ip().to_string();
    config.server.port = addr.port();

    let pool = PgPoolOptions::new().connect_lazy(&config.database.url).unwrap();

    let config = Arc::new(config);
    let state = AppState {
        pool,
        oracle,
        config: config.clone(),
    };
    let server = HttpServer::new(&config, state, api).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Non-pooled client so each test owns its connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
