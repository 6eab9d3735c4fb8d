//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     logging.rs → tracing subscriber with env-filter
//!     metrics.rs → Prometheus exporter (only when enabled in config)
//!
//! per request:
//!     TraceLayer logs method/path/status/latency
//!     admission middleware records admitted / denied / oracle-failure
//! ```

pub mod logging;
pub mod metrics;
