//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Log level configurable via RUST_LOG, with a sensible default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dwrr_balancer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
