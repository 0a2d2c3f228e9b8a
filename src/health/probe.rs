//! Worker health probing.
//!
//! # Responsibilities
//! - GET each worker's health endpoint
//! - Parse the `{"status": "<token>"}` envelope into a status
//!
//! # Design Decisions
//! - A reachable worker with a garbled or missing envelope reports
//!   `Unknown` (it can still self-report later); a transport-level
//!   failure is an error and the sweeps treat it as the worst outcome

use axum::body::Body;
use axum::http::{header, Method, Request};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use thiserror::Error;

use crate::registry::WorkerNode;

/// Status token self-reported by a worker's health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Up,
    Down,
    OutOfService,
    Unknown,
}

impl ProbeStatus {
    fn from_token(token: &str) -> Self {
        match token {
            "UP" => ProbeStatus::Up,
            "DOWN" => ProbeStatus::Down,
            "OUT_OF_SERVICE" => ProbeStatus::OutOfService,
            _ => ProbeStatus::Unknown,
        }
    }
}

/// Failure to reach a worker's health endpoint at all.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe target {0}")]
    BadTarget(String),

    #[error("probe request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("probe response body failed: {0}")]
    Body(#[from] axum::Error),
}

/// HTTP client for worker health probes.
pub struct HealthProbe {
    client: Client<HttpConnector, Body>,
    path: String,
}

impl HealthProbe {
    /// `path` is the well-known health endpoint path, leading slash included.
    pub fn new(path: String) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, path }
    }

    /// Probe one node's health endpoint.
    pub async fn probe(&self, node: &WorkerNode) -> Result<ProbeStatus, ProbeError> {
        let target = format!("{}{}", node.address, self.path);
        let request = Request::builder()
            .method(Method::GET)
            .uri(&target)
            .header(header::USER_AGENT, "dwrr-balancer-health-check")
            .body(Body::empty())
            .map_err(|_| ProbeError::BadTarget(target.clone()))?;

        let response = self.client.request(request).await?;
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX).await?;

        let status = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|v| {
                v.get("status")
                    .and_then(Value::as_str)
                    .map(ProbeStatus::from_token)
            })
            .unwrap_or(ProbeStatus::Unknown);

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(ProbeStatus::from_token("UP"), ProbeStatus::Up);
        assert_eq!(ProbeStatus::from_token("DOWN"), ProbeStatus::Down);
        assert_eq!(
            ProbeStatus::from_token("OUT_OF_SERVICE"),
            ProbeStatus::OutOfService
        );
        assert_eq!(ProbeStatus::from_token("UNKNOWN"), ProbeStatus::Unknown);
        assert_eq!(ProbeStatus::from_token("anything"), ProbeStatus::Unknown);
    }
}
