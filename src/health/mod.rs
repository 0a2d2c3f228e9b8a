//! Worker health monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! Fast sweep (monitor.rs, every 30s):
//!     Periodic timer
//!     → probe.rs against each available node
//!     → keep (UP) / demote (OUT_OF_SERVICE, UNKNOWN) / remove (DOWN, unreachable)
//!
//! Slow sweep (monitor.rs, every 300s):
//!     Periodic timer
//!     → probe.rs against each unavailable node
//!     → promote (UP) / leave in place (anything else)
//! ```
//!
//! # Design Decisions
//! - The two sweeps are independently scheduled and share one probe client
//! - Eviction happens only on the fast sweep; recovery only promotes
//! - Pool mutations go through the registry's write lock, same as registration

pub mod monitor;
pub mod probe;

pub use monitor::HealthMonitor;
pub use probe::{HealthProbe, ProbeStatus};
