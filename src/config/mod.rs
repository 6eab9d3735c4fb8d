//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (read & resolve variables)
//!     → semantic checks (origin parses, protection URL present)
//!     → AppConfig (validated, immutable)
//!     → passed by reference into startup; shared via Arc afterwards
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there are no ambient env lookups
//!   inside handlers
//! - All fields have defaults except the ones the deployment must decide
//!   (production origin, database URL)
//! - Validation separates "variable missing" from "variable malformed"

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::AppConfig;
pub use schema::CorsConfig;
pub use schema::DatabaseConfig;
pub use schema::ProtectionConfig;
pub use schema::ServerConfig;
pub use schema::StaticConfig;
