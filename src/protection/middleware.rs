//! Admission middleware.
//!
//! Gates every request on the protection oracle's decision before any
//! route handler runs. Each request costs one token.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::error::AppError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::protection::client::RequestFacts;
use crate::protection::decision::{admit, Admission};

/// Per-request token cost reported to the decision service.
const REQUEST_COST: u32 = 1;

pub async fn admission_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Passthrough mode: protection disabled by configuration.
    if !state.config.protection.enabled {
        return next.run(req).await;
    }

    let facts = RequestFacts::from_request(&req);

    match state.oracle.evaluate(&facts, REQUEST_COST).await {
        Ok(decision) => match admit(&decision) {
            Admission::Pass => {
                metrics::record_admitted();
                next.run(req).await
            }
            Admission::Deny(denial) => {
                tracing::warn!(
                    method = %facts.method,
                    path = %facts.path,
                    client_ip = ?facts.ip,
                    denial = ?denial,
                    "Request denied by protection check"
                );
                metrics::record_denied(denial);
                (denial.status(), Json(json!({ "error": denial.message() }))).into_response()
            }
        },
        Err(e) => {
            // Infrastructure fault, not a denial: log it and let the
            // central error type answer with a generic body.
            tracing::error!(
                error = %e,
                method = %facts.method,
                path = %facts.path,
                "Protection service call failed"
            );
            metrics::record_oracle_failure();
            AppError::Protection(e).into_response()
        }
    }
}
