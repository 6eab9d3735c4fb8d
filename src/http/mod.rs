//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware chain in fixed order)
//!     → protection middleware decides pass / deny
//!     → route table: "/" entry doc, /api/* groups, static fallback
//!     → error.rs shapes every error into a JSON body
//!     → Send to client
//! ```

pub mod error;
pub mod server;

pub use error::AppError;
pub use server::{AppState, HttpServer, ServerError};
