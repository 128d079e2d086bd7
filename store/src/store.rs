//! The ledger store: validated, atomic transaction creation and
//! lock-free-for-readers queries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use finledger_common::{
    LedgerError, Result, Transaction, TransactionId, TransactionKind, UserId,
};

use crate::source::{Clock, IdSource, SystemClock, UuidIdSource};

/// Everything the store guards. Both maps live under one lock so a
/// committed transaction becomes visible in the id index and the user
/// index in the same instant.
#[derive(Debug, Default)]
struct LedgerState {
    /// Primary record of every transaction, keyed by id.
    transactions: HashMap<TransactionId, Transaction>,
    /// Per-user index, in creation order.
    by_user: HashMap<UserId, Vec<TransactionId>>,
}

/// Thread-safe in-memory ledger.
///
/// Writers take the lock exclusively; any number of readers share it.
/// Transactions are immutable once created, so a clone handed out by a
/// query stays valid forever.
pub struct LedgerStore {
    state: RwLock<LedgerState>,
    id_source: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Creates an empty store with UUID ids and the system clock.
    pub fn new() -> Self {
        Self::with_sources(Arc::new(UuidIdSource), Arc::new(SystemClock))
    }

    /// Creates an empty store with injected id and time sources.
    pub fn with_sources(id_source: Arc<dyn IdSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            id_source,
            clock,
        }
    }

    /// Validates and records a new transaction, returning the stored
    /// record with its server-assigned id and timestamp.
    ///
    /// Validation happens before any shared state is touched: a rejected
    /// request leaves the ledger exactly as it was.
    #[instrument(skip(self, category, description), fields(user_id = %user_id))]
    pub fn create_transaction(
        &self,
        user_id: UserId,
        amount: Decimal,
        kind: TransactionKind,
        category: Option<String>,
        description: Option<String>,
    ) -> Result<Transaction> {
        if user_id.is_empty() {
            return Err(LedgerError::invalid_argument(
                "user_id",
                "user id must not be empty",
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(
                "amount",
                format!("amount must be positive, got {amount}"),
            ));
        }

        // Id and timestamp are drawn outside the critical section; the
        // lock only covers the two index inserts.
        let transaction = Transaction {
            id: self.id_source.next_id(),
            user_id: user_id.clone(),
            amount,
            kind,
            category,
            description,
            created_at: self.clock.now(),
        };

        {
            let mut state = self.state.write();
            state
                .by_user
                .entry(user_id)
                .or_default()
                .push(transaction.id);
            state.transactions.insert(transaction.id, transaction.clone());
        }

        debug!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "Transaction recorded"
        );

        Ok(transaction)
    }

    /// Looks up a single transaction by id.
    pub fn get_transaction(&self, id: TransactionId) -> Result<Transaction> {
        self.state
            .read()
            .transactions
            .get(&id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// Returns every transaction recorded for `user_id`, oldest first.
    ///
    /// A user the ledger has never seen yields an empty list.
    pub fn list_transactions(&self, user_id: &UserId) -> Vec<Transaction> {
        let state = self.state.read();
        state
            .by_user
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.transactions.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Derives the current balance for `user_id` by summing signed
    /// amounts over their full history. Unknown users have balance zero.
    pub fn balance(&self, user_id: &UserId) -> Decimal {
        let state = self.state.read();
        state
            .by_user
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.transactions.get(id))
                    .map(Transaction::signed_amount)
                    .sum()
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Total number of transactions across all users.
    pub fn transaction_count(&self) -> usize {
        self.state.read().transactions.len()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn credit(store: &LedgerStore, user: &str, amount: &str) -> Transaction {
        store
            .create_transaction(
                UserId::new(user),
                dec(amount),
                TransactionKind::Credit,
                None,
                None,
            )
            .unwrap()
    }

    fn debit(store: &LedgerStore, user: &str, amount: &str) -> Transaction {
        store
            .create_transaction(
                UserId::new(user),
                dec(amount),
                TransactionKind::Debit,
                None,
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_balance_reflects_credits_and_debits() {
        let store = LedgerStore::new();
        credit(&store, "alice", "100.00");
        debit(&store, "alice", "30.00");

        assert_eq!(store.balance(&UserId::new("alice")), dec("70.00"));
        assert_eq!(store.balance(&UserId::new("bob")), Decimal::ZERO);
    }

    #[test]
    fn test_balance_is_exact_for_decimal_fractions() {
        // Classic binary-float trap: 0.1 + 0.2 must equal 0.3 exactly.
        let store = LedgerStore::new();
        credit(&store, "alice", "0.10");
        credit(&store, "alice", "0.20");

        assert_eq!(store.balance(&UserId::new("alice")), dec("0.30"));
    }

    #[test]
    fn test_users_are_isolated() {
        let store = LedgerStore::new();
        credit(&store, "alice", "50.00");
        credit(&store, "bob", "10.00");
        debit(&store, "bob", "4.00");

        assert_eq!(store.balance(&UserId::new("alice")), dec("50.00"));
        assert_eq!(store.balance(&UserId::new("bob")), dec("6.00"));
        assert_eq!(store.list_transactions(&UserId::new("alice")).len(), 1);
        assert_eq!(store.list_transactions(&UserId::new("bob")).len(), 2);
    }

    #[test]
    fn test_get_returns_stored_record() {
        let store = LedgerStore::new();
        let created = store
            .create_transaction(
                UserId::new("alice"),
                dec("12.34"),
                TransactionKind::Credit,
                Some("salary".to_string()),
                Some("August payroll".to_string()),
            )
            .unwrap();

        let fetched = store.get_transaction(created.id).unwrap();
        assert_eq!(fetched, created);

        // Repeated reads observe the identical record.
        assert_eq!(store.get_transaction(created.id).unwrap(), fetched);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let store = LedgerStore::new();
        let id = TransactionId::new();

        let err = store.get_transaction(id).unwrap_err();
        assert_eq!(err, LedgerError::TransactionNotFound(id));
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_list_preserves_creation_order() {
        let store = LedgerStore::new();
        let first = credit(&store, "alice", "1.00");
        let second = debit(&store, "alice", "2.00");
        let third = credit(&store, "alice", "3.00");

        let ids: Vec<TransactionId> = store
            .list_transactions(&UserId::new("alice"))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn test_list_unknown_user_is_empty() {
        let store = LedgerStore::new();
        assert!(store.list_transactions(&UserId::new("nobody")).is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_creates() {
        let store = LedgerStore::new();
        let a = credit(&store, "alice", "1.00");
        let b = credit(&store, "alice", "1.00");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rejects_empty_user_id() {
        let store = LedgerStore::new();
        let err = store
            .create_transaction(
                UserId::new(""),
                dec("1.00"),
                TransactionKind::Credit,
                None,
                None,
            )
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(store.transaction_count(), 0);
    }

    #[test]
    fn test_rejects_zero_and_negative_amounts() {
        let store = LedgerStore::new();

        for amount in ["0.00", "-5.00"] {
            let err = store
                .create_transaction(
                    UserId::new("alice"),
                    dec(amount),
                    TransactionKind::Debit,
                    None,
                    None,
                )
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        }

        // A rejected create leaves no trace anywhere.
        assert_eq!(store.transaction_count(), 0);
        assert!(store.list_transactions(&UserId::new("alice")).is_empty());
        assert_eq!(store.balance(&UserId::new("alice")), Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_creates_are_all_recorded() {
        const THREADS: usize = 16;
        const PER_THREAD: usize = 25;

        let store = Arc::new(LedgerStore::new());

        std::thread::scope(|scope| {
            for _ in 0..THREADS {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for _ in 0..PER_THREAD {
                        credit(&store, "alice", "1.00");
                    }
                });
            }
        });

        let expected = Decimal::from((THREADS * PER_THREAD) as i64);
        assert_eq!(store.transaction_count(), THREADS * PER_THREAD);
        assert_eq!(store.balance(&UserId::new("alice")), expected);
        assert_eq!(
            store.list_transactions(&UserId::new("alice")).len(),
            THREADS * PER_THREAD
        );
    }

    #[test]
    fn test_injected_sources_control_id_and_timestamp() {
        use chrono::TimeZone;

        struct FixedId(TransactionId);
        impl IdSource for FixedId {
            fn next_id(&self) -> TransactionId {
                self.0
            }
        }

        struct FixedClock(DateTime<Utc>);
        impl Clock for FixedClock {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let id = TransactionId::new();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let store = LedgerStore::with_sources(Arc::new(FixedId(id)), Arc::new(FixedClock(at)));

        let created = credit(&store, "alice", "5.00");
        assert_eq!(created.id, id);
        assert_eq!(created.created_at, at);
    }

    proptest! {
        /// The balance always equals the signed sum of the recorded
        /// history, whatever mix of credits and debits arrives.
        #[test]
        fn prop_balance_matches_signed_history(
            ops in proptest::collection::vec((any::<bool>(), 1i64..=1_000_000i64), 0..64)
        ) {
            let store = LedgerStore::new();
            let user = UserId::new("prop-user");
            let mut expected = Decimal::ZERO;

            for (is_credit, cents) in &ops {
                let amount = Decimal::new(*cents, 2);
                let kind = if *is_credit {
                    TransactionKind::Credit
                } else {
                    TransactionKind::Debit
                };
                let created = store
                    .create_transaction(user.clone(), amount, kind, None, None)
                    .unwrap();
                expected += created.signed_amount();
            }

            prop_assert_eq!(store.balance(&user), expected);
            prop_assert_eq!(store.list_transactions(&user).len(), ops.len());
        }
    }
}
