//! HTTP surface of the balancer.
//!
//! # Data Flow
//! ```text
//! Inbound connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (dispatch / register / status)
//!     → dispatch subsystem forwards to a worker
//!     → worker response returned to the client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
