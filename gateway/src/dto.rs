//! HTTP request and response bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finledger_common::Transaction;

/// Body of `POST /v1/transactions`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Owning user.
    pub user_id: String,
    /// Non-negative amount; direction comes from `kind`.
    pub amount: Decimal,
    /// Transaction kind name (`credit`/`debit` or a legacy alias).
    pub kind: String,
    /// Optional free-form category.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A transaction as rendered over HTTP.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            user_id: tx.user_id.to_string(),
            amount: tx.amount,
            kind: tx.kind.to_string(),
            category: tx.category,
            description: tx.description,
            created_at: tx.created_at,
        }
    }
}

/// Body of `GET /v1/users/{user_id}/transactions`.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub count: usize,
}

/// Body of `GET /v1/users/{user_id}/balance`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: String,
    pub balance: Decimal,
}
