//! Weighted round-robin node selection.
//!
//! # Responsibilities
//! - Map the dispatch counter onto the current available pool
//! - Flag overloaded candidates and look for a lighter node
//!
//! # Design Decisions
//! - Size and index are read under one read-lock acquisition so the
//!   pool cannot be depopulated between the two reads
//! - The overload scan never changes the dispatch target: the rotated
//!   candidate is returned regardless, and the scan result only feeds
//!   the log line. Callers relying on rotation order can count on it
//!   being exactly `counter mod size` on every dispatch.

use std::sync::Arc;

use crate::dispatch::DispatchError;
use crate::registry::{Registry, WorkerNode};

/// Nodes below this weight are considered overloaded.
pub const OVERLOAD_THRESHOLD: f64 = 50.0;

/// Round-robin selector over the registry's available pool.
#[derive(Debug)]
pub struct Selector {
    registry: Arc<Registry>,
}

impl Selector {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Pick the node for the next dispatch.
    ///
    /// Returns `DispatchError::EmptyPool` when no workers are available.
    /// The counter is not advanced here; it moves once per completed
    /// dispatch, not per selection attempt.
    pub fn select(&self) -> Result<Arc<WorkerNode>, DispatchError> {
        self.registry.with_available(|available| {
            if available.is_empty() {
                return Err(DispatchError::EmptyPool);
            }
            let size = available.len();
            tracing::debug!(size, "selecting from available pool");

            let index = (self.registry.counter() % size as u64) as usize;
            let candidate = available[index].clone();

            if candidate.weight() < OVERLOAD_THRESHOLD && size > 1 {
                match available.iter().find(|n| n.weight() >= OVERLOAD_THRESHOLD) {
                    Some(lighter) => tracing::info!(
                        node = %candidate.name,
                        lighter = %lighter.name,
                        "node loading too heavy, lighter node present"
                    ),
                    None => tracing::info!(
                        node = %candidate.name,
                        "node loading too heavy, all nodes busy"
                    ),
                }
            }

            Ok(candidate)
        })
    }
}
