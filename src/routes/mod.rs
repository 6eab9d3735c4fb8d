//! API route groups.
//!
//! Three independent resource groups, each mounted under its own `/api`
//! prefix by the server. The pipeline only fixes the mount points and
//! their precedence; the groups are handed in as plain routers so tests
//! can substitute probes.

pub mod products;
pub mod user;
pub mod workout;

use axum::Router;

use crate::http::server::AppState;

/// The three resource route groups mounted under `/api`.
pub struct ApiRouters {
    pub products: Router<AppState>,
    pub user: Router<AppState>,
    pub workout: Router<AppState>,
}

impl ApiRouters {
    /// The crate's own route groups, used by the binary.
    pub fn app_defaults() -> Self {
        Self {
            products: products::router(),
            user: user::router(),
            workout: workout::router(),
        }
    }
}
