//! Fitshop backend server library.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌─────────────────────────────────────────────────┐
//!                    │                ADMISSION PIPELINE                │
//!                    │                                                  │
//!  Client Request    │  body limit → CORS → cookies → security headers │
//!  ──────────────────┼─▶       → request log → protection oracle       │
//!                    │                       │                          │
//!                    │           allow       │       deny               │
//!                    │             ▼         └──▶ 429 / 403 JSON        │
//!                    │  ┌─────────────────────────────┐                 │
//!                    │  │ "/"             entry doc   │                 │
//!                    │  │ "/api/products" ┐           │                 │
//!                    │  │ "/api/user"     ├ groups    │                 │
//!                    │  │ "/api/workout"  ┘           │                 │
//!                    │  │ *               static dir  │                 │
//!                    │  └─────────────────────────────┘                 │
//!                    │                                                  │
//!                    │  ┌───────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns             │  │
//!                    │  │ config │ db pool │ observability │ lifecycle│ │
//!                    │  └───────────────────────────────────────────┘  │
//!                    └─────────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request traverses the middleware chain in a fixed order
//! before any route handler runs. The protection stage consults an external
//! decision service and produces exactly one outcome per request: pass
//! through, or a JSON denial response.

// Core subsystems
pub mod config;
pub mod http;
pub mod protection;
pub mod routes;

// Persistence
pub mod db;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
