//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admission_requests_total{outcome}` (counter): admitted vs denied
//!   requests, denials labeled by reason
//! - `admission_oracle_failures_total` (counter): decision service faults
//!
//! # Design Decisions
//! - Low-overhead counter updates from the middleware hot path
//! - Exporter is opt-in; recording without an exporter is a no-op

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::protection::Denial;

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a request that passed the admission check.
pub fn record_admitted() {
    counter!("admission_requests_total", "outcome" => "admitted").increment(1);
}

/// Record a denied request, labeled by denial reason.
pub fn record_denied(denial: Denial) {
    let reason = match denial {
        Denial::RateLimited => "rate_limited",
        Denial::Bot => "bot",
        Denial::SpoofedBot => "spoofed_bot",
        Denial::Forbidden => "forbidden",
    };
    counter!("admission_requests_total", "outcome" => "denied", "reason" => reason).increment(1);
}

/// Record a decision service failure.
pub fn record_oracle_failure() {
    counter!("admission_oracle_failures_total").increment(1);
}
