//! Shared utilities for integration testing.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use dwrr_balancer::config::BalancerConfig;
use dwrr_balancer::http::HttpServer;
use dwrr_balancer::registry::Registry;

/// Serve an axum router on an ephemeral port, returning its address.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock worker that answers POST /work by echoing the payload
/// (and the request ID it was handed) under its own name, and serves
/// the given health status token.
pub async fn start_mock_worker(name: &'static str, health_status: &'static str) -> SocketAddr {
    let app = Router::new()
        .route(
            "/work",
            post(
                move |headers: axum::http::HeaderMap, Json(payload): Json<Value>| async move {
                    let request_id = headers
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "worker": name, "payload": payload, "request_id": request_id }))
                },
            ),
        )
        .route(
            "/actuator/health",
            get(move || async move { Json(json!({ "status": health_status })) }),
        );
    serve(app).await
}

/// Start a health endpoint that replies with a bare status token.
pub async fn start_health_endpoint(status: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/actuator/health",
        get(move || async move { Json(json!({ "status": status })) }),
    );
    serve(app).await
}

/// Start a health endpoint that replies with a non-JSON body.
pub async fn start_garbled_health_endpoint() -> SocketAddr {
    let app = Router::new().route("/actuator/health", get(|| async { "ok" }));
    serve(app).await
}

/// An address nothing is listening on (bound once, then dropped).
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the balancer itself (health sweeps disabled so mock pools stay
/// untouched unless a test drives a sweep by hand). Returns the bound
/// address and a registry handle.
pub async fn start_balancer() -> (SocketAddr, Arc<Registry>) {
    let mut config = BalancerConfig::default();
    config.health.enabled = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let registry = server.registry();
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    (addr, registry)
}
