//! Transport-level failures.
//!
//! These are deliberately separate from [`finledger_common::LedgerError`]:
//! a broken connection is not a ledger outcome and must never be reported
//! as one.

use thiserror::Error;

/// Errors raised while framing, sending or receiving protocol messages.
#[derive(Error, Debug)]
pub enum WireError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame announced or produced more bytes than the protocol allows.
    #[error("Frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    /// The frame body was not a valid protocol message.
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The peer closed the connection at a frame boundary.
    #[error("Connection closed by peer")]
    ConnectionClosed,
}

/// Result type for wire operations.
pub type WireResult<T> = std::result::Result<T, WireError>;
