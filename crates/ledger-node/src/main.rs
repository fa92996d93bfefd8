//! # Offer Ledger Node
//!
//! Serves per-domain offer logs and request counters over authenticated
//! HTTP.
//!
//! ```text
//! HTTP ──→ RequestRouter (ol-02) ──→ LedgerRegistry ──→ DomainLedger (ol-01)
//!                                                             │
//!                                                      KeyValueStore
//!                                                   (memory | file)
//! ```
//!
//! Configuration comes from `OL_CONFIG` (JSON file) and `OL_*` variables;
//! see `ledger_node::config`. Log verbosity follows `RUST_LOG`.

use anyhow::{Context, Result};
use ledger_node::{load_config, LedgerNode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(version = ol_02_request_router::VERSION, "Starting ledger node");

    // Load configuration
    let config = load_config().context("failed to load configuration")?;

    let node = LedgerNode::new(config)?;

    info!("Node is running. Press Ctrl+C to stop.");
    node.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
        info!("Shutdown signal received");
    })
    .await?;

    info!("Ledger node stopped");
    Ok(())
}
