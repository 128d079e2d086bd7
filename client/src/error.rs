//! Client-side failures.

use finledger_protocol::WireError;
use thiserror::Error;

/// Errors a ledger client call can produce.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("Transport error: {0}")]
    Wire(#[from] WireError),

    /// The server answered with an error response.
    #[error("{code}: {message}")]
    Remote {
        /// Stable machine-readable code, e.g. `NOT_FOUND`.
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// The server answered with a response of the wrong shape.
    #[error("Unexpected response: expected {expected}, got {got}")]
    UnexpectedResponse {
        expected: &'static str,
        got: &'static str,
    },
}

impl ClientError {
    /// The remote error code, if the server rejected the request.
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            ClientError::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
