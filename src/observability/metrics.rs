//! Metrics collection and exposition.
//!
//! # Metrics
//! - `balancer_dispatch_total` (counter): dispatches by node and status
//! - `balancer_dispatch_duration_seconds` (histogram): round-trip latency
//! - `balancer_node_available` (gauge): 1=available, 0=not
//! - `balancer_pool_size` (gauge): pool sizes by pool label
//!
//! # Design Decisions
//! - Prometheus exposition on a separate bind address
//! - Recording helpers are no-ops until the exporter is installed, so
//!   library users and tests need no setup

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record one dispatch attempt against a node.
pub fn record_dispatch(node: &str, status: u16, started: Instant) {
    counter!(
        "balancer_dispatch_total",
        "node" => node.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "balancer_dispatch_duration_seconds",
        "node" => node.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record a dispatch that never reached a worker (e.g. empty pool).
/// No latency sample is emitted since no round trip happened.
pub fn record_dispatch_rejected(status: u16) {
    counter!(
        "balancer_dispatch_total",
        "node" => "none",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a node's availability as seen by the health sweeps.
pub fn record_node_health(node: &str, available: bool) {
    gauge!("balancer_node_available", "node" => node.to_string())
        .set(if available { 1.0 } else { 0.0 });
}

/// Record current pool sizes.
pub fn record_pool_sizes(available: usize, unavailable: usize) {
    gauge!("balancer_pool_size", "pool" => "available").set(available as f64);
    gauge!("balancer_pool_size", "pool" => "unavailable").set(unavailable as f64);
}
