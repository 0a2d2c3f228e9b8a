//! Worker pool registry.
//!
//! # Responsibilities
//! - Own the available and unavailable pools
//! - Serialize pool-membership mutations behind a readers-writer lock
//! - Hold the round-robin dispatch counter
//!
//! # Design Decisions
//! - Pool size and the index computed from it are always read under a
//!   single read-lock acquisition (`with_available`), so the pool cannot
//!   shrink between the two reads
//! - Nodes are identified by Arc pointer identity; a node lives in at
//!   most one pool at a time
//! - The counter is a relaxed atomic: two in-flight dispatches may read
//!   the same index, which is an accepted best-effort relaxation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::registry::node::{NodeRegistration, WorkerNode};

#[derive(Debug, Default)]
struct Pools {
    available: Vec<Arc<WorkerNode>>,
    unavailable: Vec<Arc<WorkerNode>>,
}

/// Shared registry of worker nodes.
#[derive(Debug, Default)]
pub struct Registry {
    pools: RwLock<Pools>,
    counter: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new worker node into the available pool.
    ///
    /// Returns false without mutating anything when a required field is
    /// blank. The node always starts at full weight.
    pub fn register(&self, reg: NodeRegistration) -> bool {
        if !reg.is_valid() {
            tracing::warn!(name = %reg.name, address = %reg.address, "rejecting invalid registration");
            return false;
        }
        let node = Arc::new(WorkerNode::from(reg));
        tracing::info!(name = %node.name, address = %node.address, "registering worker node");
        let mut pools = self.pools.write().unwrap_or_else(|e| e.into_inner());
        pools.available.push(node);
        true
    }

    /// Run `f` against the available pool under a single read lock.
    ///
    /// Selection must compute its index in here so the size it divides by
    /// cannot go stale against a concurrent removal.
    pub fn with_available<R>(&self, f: impl FnOnce(&[Arc<WorkerNode>]) -> R) -> R {
        let pools = self.pools.read().unwrap_or_else(|e| e.into_inner());
        f(&pools.available)
    }

    /// Clone-out snapshot of the available pool, in order.
    pub fn snapshot_available(&self) -> Vec<Arc<WorkerNode>> {
        let pools = self.pools.read().unwrap_or_else(|e| e.into_inner());
        pools.available.clone()
    }

    /// Clone-out snapshot of the unavailable pool, in order.
    pub fn snapshot_unavailable(&self) -> Vec<Arc<WorkerNode>> {
        let pools = self.pools.read().unwrap_or_else(|e| e.into_inner());
        pools.unavailable.clone()
    }

    pub fn available_len(&self) -> usize {
        let pools = self.pools.read().unwrap_or_else(|e| e.into_inner());
        pools.available.len()
    }

    pub fn unavailable_len(&self) -> usize {
        let pools = self.pools.read().unwrap_or_else(|e| e.into_inner());
        pools.unavailable.len()
    }

    /// Move a node from available to unavailable. No-op if the node is
    /// no longer in the available pool.
    pub fn move_to_unavailable(&self, node: &Arc<WorkerNode>) {
        let mut pools = self.pools.write().unwrap_or_else(|e| e.into_inner());
        let before = pools.available.len();
        pools.available.retain(|n| !Arc::ptr_eq(n, node));
        if pools.available.len() < before {
            pools.unavailable.push(node.clone());
        }
    }

    /// Move a node from unavailable back to available. No-op if the node
    /// is no longer in the unavailable pool.
    pub fn move_to_available(&self, node: &Arc<WorkerNode>) {
        let mut pools = self.pools.write().unwrap_or_else(|e| e.into_inner());
        let before = pools.unavailable.len();
        pools.unavailable.retain(|n| !Arc::ptr_eq(n, node));
        if pools.unavailable.len() < before {
            pools.available.push(node.clone());
        }
    }

    /// Permanently remove a node from both pools.
    pub fn remove(&self, node: &Arc<WorkerNode>) {
        let mut pools = self.pools.write().unwrap_or_else(|e| e.into_inner());
        pools.available.retain(|n| !Arc::ptr_eq(n, node));
        pools.unavailable.retain(|n| !Arc::ptr_eq(n, node));
    }

    /// Current dispatch counter value.
    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Advance the counter by one completed dispatch. Wraps on overflow.
    pub fn advance_counter(&self) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::node::NodeRegistration;
    use std::thread;

    fn registration(name: &str) -> NodeRegistration {
        NodeRegistration {
            name: name.to_string(),
            address: "http://127.0.0.1:9001".to_string(),
            path: "work".to_string(),
            status: None,
        }
    }

    #[test]
    fn test_register_grows_available_pool() {
        let registry = Registry::new();
        for i in 0..5 {
            assert!(registry.register(registration(&format!("w{i}"))));
        }
        assert_eq!(registry.available_len(), 5);
        assert_eq!(registry.unavailable_len(), 0);
    }

    #[test]
    fn test_register_rejects_blank_fields() {
        let registry = Registry::new();
        let mut reg = registration("w1");
        reg.address = String::new();
        assert!(!registry.register(reg));
        assert_eq!(registry.available_len(), 0);
    }

    #[test]
    fn test_registered_node_starts_at_full_weight() {
        let registry = Registry::new();
        registry.register(registration("w1"));
        let nodes = registry.snapshot_available();
        assert_eq!(nodes[0].weight(), 100.0);
    }

    #[test]
    fn test_move_to_unavailable_and_back() {
        let registry = Registry::new();
        registry.register(registration("w1"));
        registry.register(registration("w2"));
        let node = registry.snapshot_available()[0].clone();

        registry.move_to_unavailable(&node);
        assert_eq!(registry.available_len(), 1);
        assert_eq!(registry.unavailable_len(), 1);

        registry.move_to_available(&node);
        assert_eq!(registry.available_len(), 2);
        assert_eq!(registry.unavailable_len(), 0);
    }

    #[test]
    fn test_move_is_noop_when_node_already_gone() {
        let registry = Registry::new();
        registry.register(registration("w1"));
        let node = registry.snapshot_available()[0].clone();

        registry.remove(&node);
        registry.move_to_unavailable(&node);
        // must not resurrect the node into the unavailable pool
        assert_eq!(registry.available_len(), 0);
        assert_eq!(registry.unavailable_len(), 0);
    }

    #[test]
    fn test_remove_preserves_order_of_remaining_nodes() {
        let registry = Registry::new();
        for name in ["a", "b", "c"] {
            registry.register(registration(name));
        }
        let middle = registry.snapshot_available()[1].clone();
        registry.remove(&middle);

        let names: Vec<String> = registry
            .snapshot_available()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_counter_advances_by_one() {
        let registry = Registry::new();
        assert_eq!(registry.counter(), 0);
        registry.advance_counter();
        registry.advance_counter();
        assert_eq!(registry.counter(), 2);
    }

    #[test]
    fn test_concurrent_registrations_all_land_exactly_once() {
        let registry = Arc::new(Registry::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let registry = registry.clone();
            handles.push(thread::spawn(move || {
                assert!(registry.register(registration(&format!("w{i}"))));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.available_len(), 50);

        let mut names: Vec<String> = registry
            .snapshot_available()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);
    }
}
