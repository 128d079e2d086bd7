//! finledger Client
//!
//! Typed client for the ledger server. One connection, sequential
//! request/response exchanges over the framed JSON protocol.

pub mod client;
pub mod error;

pub use client::LedgerClient;
pub use error::{ClientError, ClientResult};
