//! Error types for ledger operations.
//!
//! Only two failure modes exist at this layer: a request can be invalid, or
//! a looked-up transaction can be absent. Transport failures belong to the
//! RPC layer and have their own types there; they must never end up here.

use crate::TransactionId;
use thiserror::Error;

/// Errors raised by the ledger store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The request failed validation. Raised before any mutation; the store
    /// is left unchanged.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        field: Option<String>,
    },

    /// No transaction with the given ID exists. A normal outcome of point
    /// lookup, not a fault.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
}

impl LedgerError {
    /// Build an `InvalidArgument` for a named field.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Get the error code used in wire responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            LedgerError::TransactionNotFound(_) => "NOT_FOUND",
        }
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
