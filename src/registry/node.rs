//! Worker node descriptor.
//!
//! # Responsibilities
//! - Represent a single registered backend worker
//! - Hold the node's dispatch weight (lock-free updates)
//! - Validate registration payloads
//!
//! # Design Decisions
//! - Weight is an f64 stored as bit-cast AtomicU64 so post-dispatch
//!   weight writes never take the pool lock
//! - Name/address/path are immutable after registration

use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Weight assigned to every node at registration time.
pub const INITIAL_WEIGHT: f64 = 100.0;

/// Halved weights below this are clamped to zero.
pub const WEIGHT_FLOOR: f64 = 1e-3;

/// Registration payload for a worker node.
///
/// `status` is accepted on the wire but has no effect on the initial
/// weight or pool placement.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRegistration {
    pub name: String,
    pub address: String,
    pub path: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl NodeRegistration {
    /// A registration is valid when all three required fields are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.address.trim().is_empty()
            && !self.path.trim().is_empty()
    }
}

/// A single backend worker.
#[derive(Debug)]
pub struct WorkerNode {
    /// Display identifier, registration-supplied.
    pub name: String,
    /// Base network location, e.g. "http://127.0.0.1:9001".
    pub address: String,
    /// Request path suffix appended to the address for dispatch.
    pub path: String,
    /// Current weight as f64 bits.
    weight: AtomicU64,
}

impl WorkerNode {
    pub fn new(name: String, address: String, path: String) -> Self {
        Self {
            name,
            address,
            path,
            weight: AtomicU64::new(INITIAL_WEIGHT.to_bits()),
        }
    }

    /// Current weight, in [0, 100].
    pub fn weight(&self) -> f64 {
        f64::from_bits(self.weight.load(Ordering::Relaxed))
    }

    /// Store a new weight. Does not require the pool lock.
    pub fn set_weight(&self, weight: f64) {
        self.weight.store(weight.to_bits(), Ordering::Relaxed);
    }

    /// Full dispatch target: `address + "/" + path`.
    pub fn dispatch_target(&self) -> String {
        format!("{}/{}", self.address, self.path)
    }
}

impl From<NodeRegistration> for WorkerNode {
    fn from(reg: NodeRegistration) -> Self {
        WorkerNode::new(reg.name, reg.address, reg.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, address: &str, path: &str) -> NodeRegistration {
        NodeRegistration {
            name: name.to_string(),
            address: address.to_string(),
            path: path.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration("w1", "http://127.0.0.1:9001", "work").is_valid());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(!registration("", "http://127.0.0.1:9001", "work").is_valid());
        assert!(!registration("w1", "", "work").is_valid());
        assert!(!registration("w1", "http://127.0.0.1:9001", "").is_valid());
        assert!(!registration("   ", "http://127.0.0.1:9001", "work").is_valid());
    }

    #[test]
    fn test_initial_weight() {
        let node = WorkerNode::new("w1".into(), "http://a:1".into(), "work".into());
        assert_eq!(node.weight(), 100.0);
    }

    #[test]
    fn test_weight_round_trip() {
        let node = WorkerNode::new("w1".into(), "http://a:1".into(), "work".into());
        node.set_weight(12.5);
        assert_eq!(node.weight(), 12.5);
    }

    #[test]
    fn test_dispatch_target() {
        let node = WorkerNode::new("w1".into(), "http://127.0.0.1:9001".into(), "work".into());
        assert_eq!(node.dispatch_target(), "http://127.0.0.1:9001/work");
    }
}
