//! Protocol message types.
//!
//! These types represent the messages exchanged between ledger clients
//! and the ledger server. Every request carries the protocol version so
//! incompatible peers fail loudly instead of misreading each other.

use finledger_common::{Transaction, TransactionKind, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Protocol version spoken by this crate.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Envelope for every client-to-server message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version.
    pub version: String,
    /// The requested operation.
    pub body: RequestBody,
}

/// Envelope for every server-to-client message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Protocol version.
    pub version: String,
    /// The operation result.
    pub body: ResponseBody,
}

/// Operations a client can ask the ledger to perform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestBody {
    /// Record a new transaction for a user.
    CreateTransaction {
        /// Owning user.
        user_id: String,
        /// Non-negative amount; the direction comes from `kind`.
        amount: Decimal,
        /// Transaction kind name, parsed with [`parse_kind`].
        kind: String,
        /// Optional free-form category.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        /// Optional free-form description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Fetch one transaction by id.
    GetTransaction {
        /// Transaction id as assigned by the server.
        id: String,
    },
    /// Fetch a user's full history, oldest first.
    ListTransactions {
        /// Owning user.
        user_id: String,
    },
    /// Fetch a user's current balance.
    GetBalance {
        /// Owning user.
        user_id: String,
    },
}

/// Results the server can answer with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseBody {
    /// A single transaction record.
    Transaction {
        /// The stored record.
        transaction: Transaction,
    },
    /// A user's transaction history.
    Transactions {
        /// Records in creation order.
        transactions: Vec<Transaction>,
    },
    /// A user's derived balance.
    Balance {
        /// The user the balance belongs to.
        user_id: UserId,
        /// Signed sum over the user's history.
        balance: Decimal,
    },
    /// The request failed.
    Error {
        /// Stable machine-readable code.
        code: String,
        /// Human-readable detail.
        message: String,
    },
}

impl Request {
    /// Create a request at the current protocol version.
    pub fn new(body: RequestBody) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            body,
        }
    }
}

impl RequestBody {
    /// Wire name of the operation, for logging.
    pub fn op_name(&self) -> &'static str {
        match self {
            RequestBody::CreateTransaction { .. } => "CREATE_TRANSACTION",
            RequestBody::GetTransaction { .. } => "GET_TRANSACTION",
            RequestBody::ListTransactions { .. } => "LIST_TRANSACTIONS",
            RequestBody::GetBalance { .. } => "GET_BALANCE",
        }
    }
}

impl ResponseBody {
    /// Wire name of the response variant, for logging.
    pub fn op_name(&self) -> &'static str {
        match self {
            ResponseBody::Transaction { .. } => "TRANSACTION",
            ResponseBody::Transactions { .. } => "TRANSACTIONS",
            ResponseBody::Balance { .. } => "BALANCE",
            ResponseBody::Error { .. } => "ERROR",
        }
    }
}

impl Response {
    /// Create a response at the current protocol version.
    pub fn new(body: ResponseBody) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            body,
        }
    }

    /// Create an error response.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ResponseBody::Error {
            code: code.into(),
            message: message.into(),
        })
    }
}

/// Parse a wire kind name into a [`TransactionKind`].
///
/// Accepts the canonical names plus the legacy vocabularies still used by
/// older clients, case-insensitively. Unknown names yield `None` so the
/// caller can reject the request before the store sees it.
pub fn parse_kind(name: &str) -> Option<TransactionKind> {
    match name.to_ascii_lowercase().as_str() {
        "credit" | "income" | "in" => Some(TransactionKind::Credit),
        "debit" | "expense" | "out" => Some(TransactionKind::Debit),
        _ => None,
    }
}
