//! Connection to the ledger server.

use rust_decimal::Decimal;
use tokio::net::TcpStream;
use tracing::{debug, instrument};

use finledger_common::{Transaction, TransactionId, TransactionKind, UserId};
use finledger_protocol::{
    read_frame, write_frame, Request, RequestBody, Response, ResponseBody, WireError,
};

use crate::error::{ClientError, ClientResult};

/// Client for the ledger server.
///
/// Each method sends one request frame and waits for the matching
/// response on the same connection, so calls are strictly sequential.
pub struct LedgerClient {
    stream: TcpStream,
}

impl LedgerClient {
    /// Connect to a ledger server at `addr` (`host:port`).
    #[instrument]
    pub async fn connect(addr: &str) -> ClientResult<Self> {
        let stream = TcpStream::connect(addr).await.map_err(WireError::Io)?;
        debug!(%addr, "Connected to ledger server");
        Ok(Self { stream })
    }

    /// Record a new transaction and return the stored record.
    #[instrument(skip(self, category, description))]
    pub async fn create_transaction(
        &mut self,
        user_id: &UserId,
        amount: Decimal,
        kind: TransactionKind,
        category: Option<String>,
        description: Option<String>,
    ) -> ClientResult<Transaction> {
        let body = self
            .call(RequestBody::CreateTransaction {
                user_id: user_id.to_string(),
                amount,
                kind: kind.to_string(),
                category,
                description,
            })
            .await?;

        match body {
            ResponseBody::Transaction { transaction } => Ok(transaction),
            other => Err(unexpected("TRANSACTION", &other)),
        }
    }

    /// Fetch one transaction by id.
    pub async fn get_transaction(&mut self, id: TransactionId) -> ClientResult<Transaction> {
        let body = self
            .call(RequestBody::GetTransaction { id: id.to_string() })
            .await?;

        match body {
            ResponseBody::Transaction { transaction } => Ok(transaction),
            other => Err(unexpected("TRANSACTION", &other)),
        }
    }

    /// Fetch a user's full history, oldest first.
    pub async fn list_transactions(&mut self, user_id: &UserId) -> ClientResult<Vec<Transaction>> {
        let body = self
            .call(RequestBody::ListTransactions {
                user_id: user_id.to_string(),
            })
            .await?;

        match body {
            ResponseBody::Transactions { transactions } => Ok(transactions),
            other => Err(unexpected("TRANSACTIONS", &other)),
        }
    }

    /// Fetch a user's current balance.
    pub async fn get_balance(&mut self, user_id: &UserId) -> ClientResult<Decimal> {
        let body = self
            .call(RequestBody::GetBalance {
                user_id: user_id.to_string(),
            })
            .await?;

        match body {
            ResponseBody::Balance { balance, .. } => Ok(balance),
            other => Err(unexpected("BALANCE", &other)),
        }
    }

    // --- Private methods ---

    async fn call(&mut self, body: RequestBody) -> ClientResult<ResponseBody> {
        debug!(op = body.op_name(), "Sending request");
        write_frame(&mut self.stream, &Request::new(body)).await?;

        let response: Response = read_frame(&mut self.stream).await?;
        match response.body {
            ResponseBody::Error { code, message } => Err(ClientError::Remote { code, message }),
            body => Ok(body),
        }
    }
}

fn unexpected(expected: &'static str, got: &ResponseBody) -> ClientError {
    ClientError::UnexpectedResponse {
        expected,
        got: got.op_name(),
    }
}
