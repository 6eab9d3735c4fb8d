//! Protection decision service client.
//!
//! # Responsibilities
//! - Submit request facts to the hosted decision service
//! - Handle timeouts and transport errors gracefully
//! - Translate the wire decision into the domain model

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

use crate::config::ProtectionConfig;
use crate::protection::decision::{
    CheckKind, CheckResult, DenyReason, ProtectionDecision, Verdict,
};

/// Errors that can occur while obtaining a decision.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The decision service could not be reached or timed out.
    #[error("decision service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("decision service answered {0}")]
    Status(u16),

    /// The service answered something the client cannot interpret.
    #[error("decision service sent an unknown verdict: {0}")]
    UnknownVerdict(String),
}

/// The slice of a request the decision service scores.
#[derive(Debug, Clone, Serialize)]
pub struct RequestFacts {
    pub ip: Option<IpAddr>,
    pub method: String,
    pub path: String,
    pub user_agent: Option<String>,
}

impl RequestFacts {
    /// Collect facts from an in-flight request.
    pub fn from_request(req: &Request<Body>) -> Self {
        let ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let user_agent = req
            .headers()
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self {
            ip,
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            user_agent,
        }
    }
}

/// A source of protection decisions.
#[async_trait]
pub trait ProtectionOracle: Send + Sync {
    /// Score one request, consuming `requested` tokens from its budget.
    async fn evaluate(
        &self,
        facts: &RequestFacts,
        requested: u32,
    ) -> Result<ProtectionDecision, OracleError>;
}

/// Client for the hosted decision service.
pub struct HttpOracle {
    client: reqwest::Client,
    decide_url: String,
    api_key: String,
}

impl HttpOracle {
    pub fn new(config: &ProtectionConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            decide_url: format!("{}/v1/decide", config.service_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ProtectionOracle for HttpOracle {
    async fn evaluate(
        &self,
        facts: &RequestFacts,
        requested: u32,
    ) -> Result<ProtectionDecision, OracleError> {
        let payload = DecideRequest { facts, requested };

        let response = self
            .client
            .post(&self.decide_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OracleError::Status(response.status().as_u16()));
        }

        let wire: DecideResponse = response.json().await?;
        wire.into_decision()
    }
}

// Wire format of the decision service. Kept separate from the domain model
// so protocol drift stays contained here.

#[derive(Serialize)]
struct DecideRequest<'a> {
    #[serde(flatten)]
    facts: &'a RequestFacts,
    requested: u32,
}

#[derive(Deserialize)]
struct DecideResponse {
    conclusion: String,
    #[serde(default)]
    reason: Option<WireReason>,
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireReason {
    kind: String,
}

#[derive(Deserialize)]
struct WireResult {
    kind: String,
    #[serde(default)]
    spoofed: bool,
}

impl DecideResponse {
    fn into_decision(self) -> Result<ProtectionDecision, OracleError> {
        let verdict = match self.conclusion.as_str() {
            "ALLOW" => Verdict::Allow,
            "DENY" => {
                let reason = match self.reason.as_ref().map(|r| r.kind.as_str()) {
                    Some("RATE_LIMIT") => DenyReason::RateLimit,
                    Some("BOT") => DenyReason::Bot,
                    // Anything else the service may add maps to the generic
                    // denial, per the admission contract
                    _ => DenyReason::Other,
                };
                Verdict::Deny(reason)
            }
            other => return Err(OracleError::UnknownVerdict(other.to_string())),
        };

        let results = self
            .results
            .into_iter()
            .map(|r| CheckResult {
                kind: match r.kind.as_str() {
                    "BOT" => CheckKind::Bot,
                    "RATE_LIMIT" => CheckKind::RateLimit,
                    "SHIELD" => CheckKind::Shield,
                    _ => CheckKind::Other,
                },
                spoofed: r.spoofed,
            })
            .collect();

        Ok(ProtectionDecision { verdict, results })
    }
}
