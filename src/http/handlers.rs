//! Endpoint handlers: dispatch, register, status.
//!
//! Each path degrades independently: a failure in one request is logged
//! and answered with a status code, never propagated across requests.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::dispatch::DispatchError;
use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::registry::NodeRegistration;

/// One row of the `/status` response.
#[derive(Debug, Serialize)]
pub struct NodeStatus {
    pub name: String,
    pub address: String,
    pub path: String,
    pub weight: f64,
}

/// `POST /` — forward an opaque JSON payload to the next worker.
pub async fn dispatch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let request_id = headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match state.forwarder.dispatch(&request_id, payload).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(DispatchError::EmptyPool) => {
            tracing::warn!(request_id = %request_id, "dispatch requested with no available worker nodes");
            metrics::record_dispatch_rejected(503);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "no available worker nodes" })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "dispatch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "worker request failed" })),
            )
                .into_response()
        }
    }
}

/// `POST /register` — announce a worker node.
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<NodeRegistration>,
) -> Response {
    if state.registry.register(registration) {
        (StatusCode::OK, Json(true)).into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(false)).into_response()
    }
}

/// `GET /status` — the available pool, in dispatch order.
pub async fn status(State(state): State<AppState>) -> Json<Vec<NodeStatus>> {
    let nodes = state
        .registry
        .snapshot_available()
        .iter()
        .map(|n| NodeStatus {
            name: n.name.clone(),
            address: n.address.clone(),
            path: n.path.clone(),
            weight: n.weight(),
        })
        .collect();
    Json(nodes)
}
