//! Edge router entrypoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                  EDGE ROUTER                  │
//!                      │                                               │
//!   Client Request     │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────▶│  │  http  │──▶│ hostname │──▶│  decision  │  │
//!                      │  │ server │   │ classify │   │   engine   │  │
//!                      │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                      │                                    │         │
//!                      │             ┌──────────────────────┼───────┐ │
//!                      │             ▼                      ▼       │ │
//!                      │      ┌────────────┐         ┌───────────┐  │ │
//!   301 / rewrite /    │      │ TTL caches │◀───────▶│  content  │◀─┼─┼── Hosted DB
//!   pass-through       │      │ posts/apps │         │   store   │  │ │    (REST)
//!   ◀──────────────────┼──    └────────────┘         └───────────┘  │ │
//!                      │                                            │ │
//!                      │  Forwarded requests ───────────────────────┼─┼──▶ Origin
//!                      └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use edge_router::config::loader::load_config;
use edge_router::observability::{logging, metrics};
use edge_router::{EdgeConfig, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Edge routing layer for the content catalog site", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    logging::init(&format!(
        "edge_router={},tower_http=info",
        config.observability.log_level
    ));

    tracing::info!("edge-router v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = ?config.environment,
        upstream = %config.upstream.origin,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
