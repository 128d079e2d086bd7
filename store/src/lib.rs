//! finledger Store
//!
//! The in-memory transaction ledger. A [`LedgerStore`] records immutable
//! transactions per user and derives balances from them on demand. It is
//! safe to share across threads: writes are serialized, reads run
//! concurrently.

pub mod source;
pub mod store;

pub use source::{Clock, IdSource, SystemClock, UuidIdSource};
pub use store::LedgerStore;
