//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the route table
//! - Wire up the middleware chain in its fixed order
//! - Serve the frontend bundle with the entry document at the root
//! - Bind server to listener and serve until shutdown
//!
//! # Middleware order (request direction)
//!
//! body limit → CORS → cookie parsing → security headers → request log
//! → admission check → routes. The order is identical for every request;
//! denial responses still pass back out through the CORS and header
//! layers.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    Router,
};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::protection::{admission_middleware, ProtectionOracle};
use crate::routes::ApiRouters;

/// Maximum accepted request body size.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Error type for server construction and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid CORS origin {origin:?}: {message}")]
    InvalidOrigin { origin: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub oracle: Arc<dyn ProtectionOracle>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for the backend.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration, state and
    /// API route groups.
    pub fn new(config: &AppConfig, state: AppState, api: ApiRouters) -> Result<Self, ServerError> {
        let router = Self::build_router(config, state, api)?;
        Ok(Self { router })
    }

    /// Build the Axum router: route table first, then the middleware
    /// layers from the innermost out (the last `.layer()` call runs first
    /// on the way in).
    fn build_router(
        config: &AppConfig,
        state: AppState,
        api: ApiRouters,
    ) -> Result<Router, ServerError> {
        let origin: HeaderValue =
            config
                .cors
                .origin
                .parse()
                .map_err(|e: header::InvalidHeaderValue| ServerError::InvalidOrigin {
                    origin: config.cors.origin.clone(),
                    message: e.to_string(),
                })?;

        // Cookies are only forwarded cross-origin to the configured
        // frontend origin.
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true);

        // The bare root always answers with the entry document so the
        // frontend's client-side router can boot; other unmatched non-API
        // paths go through the generic static lookup and 404 when absent.
        let entry = ServeFile::new(config.static_files.entry_path());
        let assets = ServeDir::new(&config.static_files.dir);

        let router = Router::new()
            .route_service("/", entry)
            .nest("/api/products", api.products)
            .nest("/api/user", api.user)
            .nest("/api/workout", api.workout)
            .fallback_service(assets)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                admission_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-xss-protection"),
                HeaderValue::from_static("0"),
            ))
            .layer(CookieManagerLayer::new())
            .layer(cors)
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .with_state(state);

        Ok(router)
    }

    /// Run the server, accepting connections on the given listener until
    /// ctrl-c or the shutdown coordinator fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for ctrl-c or a shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
