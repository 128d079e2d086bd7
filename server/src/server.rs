//! TCP server: accept loop and per-connection frame handling.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

use finledger_protocol::{read_frame, write_frame, Request, Response, WireError};

use crate::config::ServerConfig;
use crate::service::LedgerService;

/// The ledger TCP server.
pub struct LedgerServer {
    listener: TcpListener,
}

impl LedgerServer {
    /// Bind the configured listen address.
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        Ok(Self { listener })
    }

    /// The address the server is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, one task per connection.
    pub async fn serve(self, service: Arc<LedgerService>) -> io::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let service = service.clone();
                    tokio::spawn(async move {
                        handle_connection(stream, peer, service).await;
                    });
                }
                Err(err) => {
                    warn!(error = %err, "Failed to accept connection");
                }
            }
        }
    }
}

/// Serve one client connection until it closes or the stream breaks.
async fn handle_connection(stream: TcpStream, peer: SocketAddr, service: Arc<LedgerService>) {
    service.metrics().connection_opened();
    debug!(%peer, "Connection opened");

    let (mut reader, mut writer) = stream.into_split();

    loop {
        let request: Request = match read_frame(&mut reader).await {
            Ok(request) => request,
            Err(WireError::ConnectionClosed) => {
                debug!(%peer, "Connection closed");
                break;
            }
            // A malformed body still consumed its whole frame, so the
            // stream stays aligned at the next frame boundary.
            Err(WireError::Malformed(err)) => {
                warn!(%peer, error = %err, "Malformed request");
                let response =
                    Response::error("INVALID_ARGUMENT", format!("Malformed request: {err}"));
                if write_frame(&mut writer, &response).await.is_err() {
                    break;
                }
                continue;
            }
            Err(err) => {
                warn!(%peer, error = %err, "Dropping connection");
                break;
            }
        };

        let response = service.handle(request);
        if let Err(err) = write_frame(&mut writer, &response).await {
            warn!(%peer, error = %err, "Failed to write response");
            break;
        }
    }

    service.metrics().connection_closed();
}
