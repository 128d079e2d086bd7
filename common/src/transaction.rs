//! The transaction record and its kind.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identifiers::{TransactionId, UserId};

/// Direction of a transaction's effect on the owning user's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Increases the balance.
    Credit,
    /// Decreases the balance.
    Debit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Credit => write!(f, "credit"),
            TransactionKind::Debit => write!(f, "debit"),
        }
    }
}

/// A single ledger transaction.
///
/// Immutable once created: there is no update or delete, corrections are
/// modeled as new offsetting transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID, assigned by the store.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Monetary amount, always non-negative; the sign comes from `kind`.
    pub amount: Decimal,
    /// Whether this credits or debits the user's balance.
    pub kind: TransactionKind,
    /// Free-form category, no effect on the balance.
    pub category: Option<String>,
    /// Free-form description, no effect on the balance.
    pub description: Option<String>,
    /// When the transaction was created. Wall-clock, display/ordering only.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Get the signed amount: `+amount` for a credit, `-amount` for a debit.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Credit => self.amount,
            TransactionKind::Debit => -self.amount,
        }
    }
}
