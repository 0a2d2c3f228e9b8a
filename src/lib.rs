//! Dynamic weighted round-robin load balancer.
//!
//! Routes JSON requests across a dynamically registered pool of worker
//! nodes. Weights adapt to observed response latency, and background
//! health sweeps move nodes between the available and unavailable pools.

pub mod config;
pub mod dispatch;
pub mod health;
pub mod http;
pub mod observability;
pub mod registry;

pub use config::schema::BalancerConfig;
pub use http::HttpServer;
pub use registry::Registry;
