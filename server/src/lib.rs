//! finledger Server
//!
//! The ledger server owns the in-memory store and exposes it to clients
//! over the framed JSON protocol. One task per connection; the store
//! serializes writers internally.

pub mod config;
pub mod metrics;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use metrics::{Metrics, MetricsSnapshot, SharedMetrics};
pub use server::LedgerServer;
pub use service::LedgerService;
