//! Metrics collection for server monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Ledger server metrics.
pub struct Metrics {
    /// Total requests handled.
    pub requests_total: AtomicU64,
    /// Transactions successfully created.
    pub transactions_created: AtomicU64,
    /// Requests rejected by validation.
    pub validation_failures: AtomicU64,
    /// Lookups that found nothing.
    pub lookups_not_found: AtomicU64,
    /// Total connections accepted.
    pub connections_opened: AtomicU64,
    /// Connections currently open.
    pub connections_active: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            transactions_created: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            lookups_not_found: AtomicU64::new(0),
            connections_opened: AtomicU64::new(0),
            connections_active: AtomicU64::new(0),
        }
    }

    /// Increment requests handled.
    pub fn request_received(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful transaction creation.
    pub fn transaction_created(&self) {
        self.transactions_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a validation rejection.
    pub fn validation_failed(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that found nothing.
    pub fn lookup_missed(&self) {
        self.lookups_not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a newly accepted connection.
    pub fn connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a closed connection.
    pub fn connection_closed(&self) {
        self.connections_active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            transactions_created: self.transactions_created.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            lookups_not_found: self.lookups_not_found.load(Ordering::Relaxed),
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub transactions_created: u64,
    pub validation_failures: u64,
    pub lookups_not_found: u64,
    pub connections_opened: u64,
    pub connections_active: u64,
}

/// Shared metrics instance.
pub type SharedMetrics = Arc<Metrics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_increment() {
        let metrics = Metrics::new();

        metrics.request_received();
        metrics.request_received();
        metrics.transaction_created();
        metrics.connection_opened();
        metrics.connection_closed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_total, 2);
        assert_eq!(snapshot.transactions_created, 1);
        assert_eq!(snapshot.connections_opened, 1);
        assert_eq!(snapshot.connections_active, 0);
    }
}
