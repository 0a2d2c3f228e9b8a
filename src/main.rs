//! Dynamic weighted round-robin load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 LOAD BALANCER                │
//!   Client Request     │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!   ───────────────────┼─▶│  http  │──▶│ selector │──▶│ forwarder │───┼──▶ Worker
//!                      │  │ server │   │ (WRR)    │   │  (POST)   │   │    Node
//!                      │  └────────┘   └────┬─────┘   └─────┬─────┘   │
//!                      │                    │               │         │
//!                      │               ┌────▼─────┐   ┌─────▼─────┐   │
//!                      │               │ registry │◀──│  weight   │   │
//!                      │               │ (2 pools)│   │  policy   │   │
//!                      │               └────▲─────┘   └───────────┘   │
//!                      │                    │                         │
//!                      │            ┌───────┴────────┐                │
//!                      │            │ health sweeps  │───────────────┼──▶ GET /actuator/health
//!                      │            │ fast / slow    │                │
//!                      │            └────────────────┘                │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use dwrr_balancer::config::{load_config, BalancerConfig};
use dwrr_balancer::http::HttpServer;
use dwrr_balancer::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "dwrr-balancer", about = "Dynamic weighted round-robin load balancer")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BalancerConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_path = %config.health.probe_path,
        fast_interval_secs = config.health.fast_interval_secs,
        slow_interval_secs = config.health.slow_interval_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
