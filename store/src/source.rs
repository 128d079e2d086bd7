//! Id and timestamp sources injected into the store.

use chrono::{DateTime, Utc};
use finledger_common::TransactionId;

/// Produces identifiers for new transactions.
///
/// The store asks this source for an id before it touches any shared
/// state, so implementations must be callable from multiple threads.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> TransactionId;
}

/// Produces creation timestamps for new transactions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production id source backed by random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> TransactionId {
        TransactionId::new()
    }
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
