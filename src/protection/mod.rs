//! Request protection subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → middleware.rs (collect request facts)
//!     → client.rs (ask the hosted decision service, cost = 1 token)
//!     → decision.rs (map the decision to pass / deny)
//!     → pass to routing, or answer 429/403 with a JSON body
//! ```
//!
//! # Design Decisions
//! - The decision mapping is a pure function over sum types, testable
//!   without a server harness
//! - The oracle is a trait so tests can substitute canned decisions
//! - A transport failure is an infrastructure fault, not a denial: it is
//!   logged and surfaces as a generic 500, never as a leaked error string

pub mod client;
pub mod decision;
pub mod middleware;

pub use client::{HttpOracle, OracleError, ProtectionOracle, RequestFacts};
pub use decision::{
    admit, Admission, CheckKind, CheckResult, Denial, DenyReason, ProtectionDecision, Verdict,
};
pub use middleware::admission_middleware;
