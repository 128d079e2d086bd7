//! Request dispatch.
//!
//! [`LedgerService`] translates protocol requests into store calls and
//! store outcomes back into protocol responses. Kind names and ids are
//! parsed here, at the edge; the store only ever sees typed values.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use finledger_common::{LedgerError, TransactionId, UserId};
use finledger_protocol::{parse_kind, Request, RequestBody, Response, ResponseBody, PROTOCOL_VERSION};
use finledger_store::LedgerStore;

use crate::metrics::{Metrics, SharedMetrics};

/// Stable error code for protocol version mismatches.
pub const UNSUPPORTED_VERSION: &str = "UNSUPPORTED_VERSION";

/// The ledger RPC service.
pub struct LedgerService {
    store: Arc<LedgerStore>,
    metrics: SharedMetrics,
}

impl LedgerService {
    /// Create a service over the given store.
    pub fn new(store: Arc<LedgerStore>, metrics: SharedMetrics) -> Self {
        Self { store, metrics }
    }

    /// The metrics this service reports into.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Handle one request envelope and produce the response envelope.
    #[instrument(skip(self, request), fields(op = request.body.op_name()))]
    pub fn handle(&self, request: Request) -> Response {
        self.metrics.request_received();

        if request.version != PROTOCOL_VERSION {
            warn!(version = %request.version, "Rejecting request with unsupported version");
            return Response::error(
                UNSUPPORTED_VERSION,
                format!(
                    "Protocol version {} is not supported, expected {}",
                    request.version, PROTOCOL_VERSION
                ),
            );
        }

        debug!(op = request.body.op_name(), "Handling request");
        Response::new(self.dispatch(request.body))
    }

    // --- Private methods ---

    fn dispatch(&self, body: RequestBody) -> ResponseBody {
        match body {
            RequestBody::CreateTransaction {
                user_id,
                amount,
                kind,
                category,
                description,
            } => {
                let kind = match parse_kind(&kind) {
                    Some(kind) => kind,
                    None => {
                        return self.reject(LedgerError::invalid_argument(
                            "kind",
                            format!("Unknown transaction kind: {kind}"),
                        ));
                    }
                };

                match self.store.create_transaction(
                    UserId::new(user_id),
                    amount,
                    kind,
                    category,
                    description,
                ) {
                    Ok(transaction) => {
                        self.metrics.transaction_created();
                        ResponseBody::Transaction { transaction }
                    }
                    Err(err) => self.reject(err),
                }
            }

            RequestBody::GetTransaction { id } => {
                let id = match TransactionId::parse(&id) {
                    Ok(id) => id,
                    Err(_) => {
                        return self.reject(LedgerError::invalid_argument(
                            "id",
                            format!("Not a valid transaction id: {id}"),
                        ));
                    }
                };

                match self.store.get_transaction(id) {
                    Ok(transaction) => ResponseBody::Transaction { transaction },
                    Err(err) => self.reject(err),
                }
            }

            RequestBody::ListTransactions { user_id } => {
                let transactions = self.store.list_transactions(&UserId::new(user_id));
                ResponseBody::Transactions { transactions }
            }

            RequestBody::GetBalance { user_id } => {
                let user_id = UserId::new(user_id);
                let balance = self.store.balance(&user_id);
                ResponseBody::Balance { user_id, balance }
            }
        }
    }

    fn reject(&self, err: LedgerError) -> ResponseBody {
        match &err {
            LedgerError::InvalidArgument { .. } => self.metrics.validation_failed(),
            LedgerError::TransactionNotFound(_) => self.metrics.lookup_missed(),
        }
        warn!(code = err.error_code(), error = %err, "Request rejected");

        ResponseBody::Error {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}
