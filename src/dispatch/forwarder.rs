//! Request forwarding to worker nodes.
//!
//! # Responsibilities
//! - Select a node and POST the payload to it verbatim
//! - Time the full round trip and feed the weight policy
//! - Advance the dispatch counter once per completed dispatch

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Method, Request};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;

use crate::dispatch::weight::adjusted_weight;
use crate::dispatch::{DispatchError, Selector};
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::registry::{Registry, WorkerNode};

/// Forwards dispatch requests to the selected worker.
pub struct Forwarder {
    registry: Arc<Registry>,
    selector: Selector,
    client: Client<HttpConnector, Body>,
}

impl Forwarder {
    pub fn new(registry: Arc<Registry>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            selector: Selector::new(registry.clone()),
            registry,
            client,
        }
    }

    /// Select a worker and forward `payload` to it.
    ///
    /// The caller's request ID travels with the forwarded call. On
    /// success the node's weight is updated from the observed round trip
    /// and the counter advances. A transport failure is returned to the
    /// caller without touching pool membership.
    pub async fn dispatch(&self, request_id: &str, payload: Value) -> Result<Value, DispatchError> {
        let node = self.selector.select()?;
        self.forward(&node, request_id, payload).await
    }

    async fn forward(
        &self,
        node: &Arc<WorkerNode>,
        request_id: &str,
        payload: Value,
    ) -> Result<Value, DispatchError> {
        let target = node.dispatch_target();
        let request = Request::builder()
            .method(Method::POST)
            .uri(&target)
            .header(header::CONTENT_TYPE, "application/json")
            .header(X_REQUEST_ID.clone(), request_id)
            .body(Body::from(payload.to_string()))
            .map_err(|_| DispatchError::BadTarget(target.clone()))?;

        let started = Instant::now();
        let response = self.client.request(request).await.inspect_err(|e| {
            tracing::error!(
                request_id = %request_id,
                node = %node.name,
                target = %target,
                error = %e,
                "worker request failed"
            );
            metrics::record_dispatch(&node.name, 502, started);
        })?;
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let body: Value = serde_json::from_slice(&bytes)?;

        let previous = node.weight();
        node.set_weight(adjusted_weight(previous, elapsed_ms));
        tracing::info!(
            request_id = %request_id,
            node = %node.name,
            elapsed_ms,
            weight = node.weight(),
            "dispatch complete"
        );
        metrics::record_dispatch(&node.name, 200, started);

        self.registry.advance_counter();

        Ok(body)
    }
}
