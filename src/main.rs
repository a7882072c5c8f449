//! Revive Gateway
//!
//! An HTTP gateway exposing an un-delete ("revive") operation for
//! entities in an external production-tracking service, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌────────────────────────────────────────────┐
//!                        │               REVIVE GATEWAY               │
//!                        │                                            │
//!   POST /{type}/{id}/   │  ┌─────────┐   ┌──────────┐   ┌─────────┐ │
//!   revive ──────────────┼─▶│  http   │──▶│ routing  │──▶│upstream │─┼──▶ Tracker
//!                        │  │ server  │   │ matcher  │   │transport│ │     API
//!                        │  └─────────┘   └──────────┘   └────┬────┘ │
//!                        │                                    │      │
//!   200/403/404/400/502  │  ┌──────────────────────────┐      │      │
//!   ◀────────────────────┼──│   revive classifier      │◀─────┘      │
//!                        │  │ (envelope → outcome)     │             │
//!                        │  └──────────────────────────┘             │
//!                        │                                            │
//!                        │  config · observability · lifecycle        │
//!                        └────────────────────────────────────────────┘
//! ```
//!
//! One outcome per request; nothing retried, nothing persisted.

// Core subsystems
pub mod config;
pub mod http;
pub mod revive;
pub mod routing;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => config::load_config(Path::new(&path))?,
        None => GatewayConfig::default(),
    };

    observability::logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
