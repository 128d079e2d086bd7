//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use finledger_client::LedgerClient;
use finledger_common::{TransactionId, UserId};
use finledger_protocol::parse_kind;

use crate::dto::{
    BalanceResponse, CreateTransactionRequest, ListTransactionsResponse, TransactionResponse,
};
use crate::error::{ApiError, ApiResult};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Address of the ledger server requests are forwarded to.
    pub ledger_addr: Arc<String>,
}

impl AppState {
    /// Create state pointing at a ledger server.
    pub fn new(ledger_addr: impl Into<String>) -> Self {
        Self {
            ledger_addr: Arc::new(ledger_addr.into()),
        }
    }

    /// Open a ledger connection for the duration of one request.
    async fn connect(&self) -> ApiResult<LedgerClient> {
        Ok(LedgerClient::connect(&self.ledger_addr).await?)
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/transactions", post(create_transaction))
        .route("/v1/transactions/{id}", get(get_transaction))
        .route("/v1/users/{user_id}/transactions", get(list_transactions))
        .route("/v1/users/{user_id}/balance", get(get_balance))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Record a new transaction.
async fn create_transaction(
    State(state): State<AppState>,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let kind = parse_kind(&req.kind)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown transaction kind: {}", req.kind)))?;

    let mut client = state.connect().await?;
    let transaction = client
        .create_transaction(
            &UserId::new(req.user_id),
            req.amount,
            kind,
            req.category,
            req.description,
        )
        .await?;

    Ok(Json(transaction.into()))
}

/// Fetch one transaction by id.
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransactionResponse>> {
    let id = TransactionId::parse(&id)
        .map_err(|_| ApiError::BadRequest(format!("Not a valid transaction id: {id}")))?;

    let mut client = state.connect().await?;
    let transaction = client.get_transaction(id).await?;

    Ok(Json(transaction.into()))
}

/// Fetch a user's full history, oldest first.
async fn list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ListTransactionsResponse>> {
    let mut client = state.connect().await?;
    let transactions = client.list_transactions(&UserId::new(user_id)).await?;

    Ok(Json(ListTransactionsResponse {
        count: transactions.len(),
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}

/// Fetch a user's current balance.
async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<BalanceResponse>> {
    let user_id = UserId::new(user_id);

    let mut client = state.connect().await?;
    let balance = client.get_balance(&user_id).await?;

    Ok(Json(BalanceResponse {
        user_id: user_id.to_string(),
        balance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use finledger_server::{LedgerServer, LedgerService, Metrics, ServerConfig};
    use finledger_store::LedgerStore;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn start_ledger() -> String {
        let service = Arc::new(LedgerService::new(
            Arc::new(LedgerStore::new()),
            Arc::new(Metrics::new()),
        ));
        let config = ServerConfig {
            listen_addr: "127.0.0.1".to_string(),
            listen_port: 0,
        };
        let server = LedgerServer::bind(&config).await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve(service));
        addr.to_string()
    }

    async fn test_app() -> Router {
        create_router(AppState::new(start_ledger().await))
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = call(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_read_list_balance() {
        let app = test_app().await;

        let (status, created) = call(
            app.clone(),
            "POST",
            "/v1/transactions",
            Some(json!({ "user_id": "alice", "amount": "100.00", "kind": "credit" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["kind"], "credit");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            app.clone(),
            "POST",
            "/v1/transactions",
            Some(json!({ "user_id": "alice", "amount": "30.00", "kind": "debit" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, fetched) = call(app.clone(), "GET", &format!("/v1/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], created["id"]);

        let (status, list) = call(app.clone(), "GET", "/v1/users/alice/transactions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(list["count"], 2);

        let (status, balance) = call(app, "GET", "/v1/users/alice/balance", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(balance["balance"], "70.00");
        assert_eq!(balance["user_id"], "alice");
    }

    #[tokio::test]
    async fn test_unknown_transaction_is_not_found() {
        let app = test_app().await;

        let uri = format!("/v1/transactions/{}", TransactionId::new());
        let (status, body) = call(app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let app = test_app().await;

        let (status, body) = call(app, "GET", "/v1/transactions/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_unknown_kind_is_bad_request() {
        let app = test_app().await;

        let (status, body) = call(
            app,
            "POST",
            "/v1/transactions",
            Some(json!({ "user_id": "alice", "amount": "5.00", "kind": "transfer" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_ledger_rejection_is_bad_request() {
        let app = test_app().await;

        let (status, body) = call(
            app,
            "POST",
            "/v1/transactions",
            Some(json!({ "user_id": "alice", "amount": "-5.00", "kind": "debit" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_unknown_user_reads_are_empty() {
        let app = test_app().await;

        let (status, list) = call(app.clone(), "GET", "/v1/users/nobody/transactions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list["transactions"].as_array().unwrap().is_empty());

        let (status, balance) = call(app, "GET", "/v1/users/nobody/balance", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(balance["balance"], "0");
    }

    #[tokio::test]
    async fn test_dead_ledger_is_bad_gateway() {
        // Nothing listens on port 1.
        let app = create_router(AppState::new("127.0.0.1:1"));

        let (status, body) = call(app, "GET", "/v1/users/alice/balance", None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    }
}
