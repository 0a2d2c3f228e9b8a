//! Worker node registry.
//!
//! # Data Flow
//! ```text
//! POST /register → NodeRegistration validated → available pool (weight 100)
//! dispatch path  → with_available (read lock) → counter % size → node
//! health sweeps  → move_to_unavailable / move_to_available / remove
//! ```
//!
//! # Design Decisions
//! - One readers-writer lock guards both pools; weight updates bypass it
//! - Pool order is stable apart from appends and removals

pub mod node;
pub mod pool;

pub use node::{NodeRegistration, WorkerNode};
pub use pool::Registry;
