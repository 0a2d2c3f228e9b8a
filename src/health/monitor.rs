//! Periodic health sweeps.
//!
//! # Responsibilities
//! - Fast sweep: probe the available pool, demote or evict failing nodes
//! - Slow sweep: probe the unavailable pool, promote recovered nodes
//!
//! # State Transitions
//! ```text
//! available   --probe DOWN or unreachable-->  removed (permanent)
//! available   --probe OUT_OF_SERVICE/UNKNOWN--> unavailable
//! unavailable --probe UP-->                   available
//! unavailable --anything else-->              unavailable (no pruning)
//! ```
//!
//! # Design Decisions
//! - Each sweep iterates a snapshot, so probing never holds the pool lock
//! - The recovery sweep only promotes; eviction happens exclusively on
//!   the fast sweep over the available pool

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::schema::HealthConfig;
use crate::health::probe::{HealthProbe, ProbeStatus};
use crate::observability::metrics;
use crate::registry::Registry;

pub struct HealthMonitor {
    registry: Arc<Registry>,
    config: HealthConfig,
    probe: HealthProbe,
}

impl HealthMonitor {
    pub fn new(registry: Arc<Registry>, config: HealthConfig) -> Self {
        let probe = HealthProbe::new(config.probe_path.clone());
        Self {
            registry,
            config,
            probe,
        }
    }

    /// Run the fast sweep on its interval until shutdown.
    pub async fn run_fast(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval = self.config.fast_interval_secs,
            path = %self.config.probe_path,
            "fast health sweep starting"
        );
        let mut ticker = time::interval(Duration::from_secs(self.config.fast_interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.fast_sweep().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("fast health sweep received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run the slow (recovery) sweep on its interval until shutdown.
    pub async fn run_slow(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval = self.config.slow_interval_secs,
            path = %self.config.probe_path,
            "slow health sweep starting"
        );
        let mut ticker = time::interval(Duration::from_secs(self.config.slow_interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.slow_sweep().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("slow health sweep received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// One pass over the available pool.
    pub async fn fast_sweep(&self) {
        for node in self.registry.snapshot_available() {
            match self.probe.probe(&node).await {
                Ok(ProbeStatus::Up) => {
                    tracing::debug!(node = %node.name, "worker healthy");
                    metrics::record_node_health(&node.name, true);
                }
                Ok(ProbeStatus::Down) => {
                    tracing::warn!(node = %node.name, "worker reports DOWN, removing");
                    self.registry.remove(&node);
                    metrics::record_node_health(&node.name, false);
                }
                Ok(status) => {
                    tracing::warn!(node = %node.name, ?status, "worker not serviceable, moving to unavailable pool");
                    self.registry.move_to_unavailable(&node);
                    metrics::record_node_health(&node.name, false);
                }
                Err(e) => {
                    // An unreachable worker cannot self-report later.
                    tracing::warn!(node = %node.name, error = %e, "worker unreachable, removing");
                    self.registry.remove(&node);
                    metrics::record_node_health(&node.name, false);
                }
            }
        }
        metrics::record_pool_sizes(
            self.registry.available_len(),
            self.registry.unavailable_len(),
        );
    }

    /// One pass over the unavailable pool.
    pub async fn slow_sweep(&self) {
        for node in self.registry.snapshot_unavailable() {
            match self.probe.probe(&node).await {
                Ok(ProbeStatus::Up) => {
                    tracing::info!(node = %node.name, "worker recovered, moving to available pool");
                    self.registry.move_to_available(&node);
                    metrics::record_node_health(&node.name, true);
                }
                Ok(status) => {
                    tracing::debug!(node = %node.name, ?status, "worker still not serviceable");
                }
                Err(e) => {
                    tracing::debug!(node = %node.name, error = %e, "worker still unreachable");
                }
            }
        }
        metrics::record_pool_sizes(
            self.registry.available_len(),
            self.registry.unavailable_len(),
        );
    }
}
