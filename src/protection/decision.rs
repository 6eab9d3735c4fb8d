//! Protection decision model and admission mapping.
//!
//! # Responsibilities
//! - Model one decision returned by the protection service
//! - Map a decision to an admission outcome (pass or a concrete denial)
//!
//! # Design Decisions
//! - `Verdict` is a sum type: a denial always carries its reason, so the
//!   "denied implies reason present" invariant is structural
//! - Mapping order is fixed and first-match-wins: rate limit, then bot,
//!   then any other denial, then the spoofed-bot sweep over check results
//! - The spoofed-bot sweep runs on the allow branch as well; individual
//!   check results can flag a forged bot signature even when the overall
//!   verdict allows the request

use axum::http::StatusCode;

/// Top-level outcome of one protection service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(DenyReason),
}

/// Why the protection service denied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    RateLimit,
    Bot,
    Other,
}

/// Which rule produced an individual check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Bot,
    RateLimit,
    Shield,
    Other,
}

/// One rule's diagnostic result, reported alongside the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub kind: CheckKind,
    /// The rule detected a forged/tampered identification signal.
    pub spoofed: bool,
}

impl CheckResult {
    /// A bot check whose identifying signal was forged.
    pub fn is_spoofed_bot(&self) -> bool {
        matches!(self.kind, CheckKind::Bot) && self.spoofed
    }
}

/// Result of one protection service call.
///
/// `results` may be non-empty even when the verdict allows the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionDecision {
    pub verdict: Verdict,
    pub results: Vec<CheckResult>,
}

impl ProtectionDecision {
    pub fn allow() -> Self {
        Self {
            verdict: Verdict::Allow,
            results: Vec::new(),
        }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Self {
            verdict: Verdict::Deny(reason),
            results: Vec::new(),
        }
    }

    pub fn with_results(mut self, results: Vec<CheckResult>) -> Self {
        self.results = results;
        self
    }
}

/// Admission outcome for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Hand the request to the next pipeline stage unmodified.
    Pass,
    /// Answer immediately with the denial's status and body.
    Deny(Denial),
}

/// Client-facing denial categories, each with a fixed status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    RateLimited,
    Bot,
    SpoofedBot,
    Forbidden,
}

impl Denial {
    pub fn status(&self) -> StatusCode {
        match self {
            Denial::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Denial::Bot | Denial::SpoofedBot | Denial::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Denial::RateLimited => "Too many requests",
            Denial::Bot => "Bot access denied",
            Denial::SpoofedBot => "Spoofed bot detected",
            Denial::Forbidden => "Forbidden",
        }
    }
}

/// Map a protection decision to an admission outcome.
///
/// Evaluation order: explicit denial first (rate limit, bot, anything
/// else), then the spoofed-bot sweep over the per-check results.
pub fn admit(decision: &ProtectionDecision) -> Admission {
    match decision.verdict {
        Verdict::Deny(DenyReason::RateLimit) => Admission::Deny(Denial::RateLimited),
        Verdict::Deny(DenyReason::Bot) => Admission::Deny(Denial::Bot),
        Verdict::Deny(DenyReason::Other) => Admission::Deny(Denial::Forbidden),
        Verdict::Allow => {
            if decision.results.iter().any(CheckResult::is_spoofed_bot) {
                Admission::Deny(Denial::SpoofedBot)
            } else {
                Admission::Pass
            }
        }
    }
}
