//! finledger Server Binary
//!
//! Serves the in-memory transaction ledger over the framed JSON protocol.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finledger_server::{LedgerServer, LedgerService, Metrics, ServerConfig};
use finledger_store::LedgerStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting finledger server");

    // Load configuration
    let config = ServerConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let store = Arc::new(LedgerStore::new());
    let metrics = Arc::new(Metrics::new());
    let service = Arc::new(LedgerService::new(store, metrics.clone()));

    let server = LedgerServer::bind(&config).await?;
    info!(addr = %server.local_addr()?, "Ledger server listening");

    tokio::select! {
        result = server.serve(service) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    let snapshot = metrics.snapshot();
    info!(
        requests_total = snapshot.requests_total,
        transactions_created = snapshot.transactions_created,
        validation_failures = snapshot.validation_failures,
        lookups_not_found = snapshot.lookups_not_found,
        connections_opened = snapshot.connections_opened,
        "Final metrics"
    );

    info!("Ledger server shutdown complete");
    Ok(())
}
