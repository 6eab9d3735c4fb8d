//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     metrics exporter → database init → state + router → bind → serve
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c or trigger → stop accepting → drain in-flight → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: subsystems initialize sequentially, listener last
//! - Fail fast: any startup error keeps the process from listening

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
