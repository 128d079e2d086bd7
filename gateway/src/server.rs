//! Gateway server setup.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::routes::{create_router, AppState};

/// Build the application router with middleware attached.
pub fn create_app(config: &GatewayConfig) -> Router {
    let state = AppState::new(config.ledger_addr.clone());

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Run the gateway until the process is stopped.
pub async fn run_server(config: GatewayConfig) -> io::Result<()> {
    let app = create_app(&config);
    let listener = TcpListener::bind(config.bind_addr()).await?;

    info!(
        addr = %listener.local_addr()?,
        ledger_addr = %config.ledger_addr,
        "Gateway listening"
    );

    axum::serve(listener, app).await
}

/// Start the gateway in the background and return its bound address.
pub async fn start_background_server(config: GatewayConfig) -> io::Result<SocketAddr> {
    let app = create_app(&config);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(error = %err, "Gateway server error");
        }
    });

    Ok(addr)
}
