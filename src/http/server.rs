//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch/register/status handlers
//! - Wire up middleware (tracing, request ID)
//! - Spawn the health sweeps alongside the server
//! - Graceful shutdown on ctrl-c, fanned out to the sweeps

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::schema::BalancerConfig;
use crate::dispatch::Forwarder;
use crate::health::HealthMonitor;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::registry::Registry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the load balancer.
pub struct HttpServer {
    router: Router,
    config: BalancerConfig,
    registry: Arc<Registry>,
}

impl HttpServer {
    /// Create a new server with an empty registry.
    pub fn new(config: BalancerConfig) -> Self {
        let registry = Arc::new(Registry::new());
        let forwarder = Arc::new(Forwarder::new(registry.clone()));

        let state = AppState {
            registry: registry.clone(),
            forwarder,
        };

        let router = Self::build_router(state);
        Self {
            router,
            config,
            registry,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", post(handlers::dispatch))
            .route("/register", post(handlers::register))
            .route("/status", get(handlers::status))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let (shutdown_tx, _) = broadcast::channel(1);

        if self.config.health.enabled {
            let monitor = Arc::new(HealthMonitor::new(
                self.registry.clone(),
                self.config.health.clone(),
            ));
            tokio::spawn(Arc::clone(&monitor).run_fast(shutdown_tx.subscribe()));
            tokio::spawn(monitor.run_slow(shutdown_tx.subscribe()));
        } else {
            tracing::info!("health sweeps disabled");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown_tx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared registry handle, mainly for tests and status inspection.
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }
}

/// Wait for ctrl-c, then fan the shutdown out to the background sweeps.
async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
    let _ = shutdown_tx.send(());
}
