//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! POST / → selector.rs (counter % pool size, overload check)
//!     → forwarder.rs (POST to address/path, time the round trip)
//!     → weight.rs (latency → new weight, stored on the node)
//!     → counter advances by one
//! ```
//!
//! # Design Decisions
//! - A dispatch failure never evicts a node; pool membership changes
//!   only through the health sweeps
//! - No deadline is imposed on the forward call beyond the transport
//!   defaults, so a hung worker occupies its task for the duration

pub mod forwarder;
pub mod selector;
pub mod weight;

pub use forwarder::Forwarder;
pub use selector::Selector;

use thiserror::Error;

/// Failures on the dispatch path.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No workers in the available pool at selection time.
    #[error("no available worker nodes")]
    EmptyPool,

    /// The node's address + path did not form a sendable request.
    #[error("invalid dispatch target {0}")]
    BadTarget(String),

    /// The forward call failed at the transport level.
    #[error("worker request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The worker's response body could not be read.
    #[error("worker response body failed: {0}")]
    Body(#[from] axum::Error),

    /// The worker responded with something that is not JSON.
    #[error("worker response was not valid JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
