//! finledger Gateway
//!
//! HTTP facade over the ledger server. Each request opens a short-lived
//! connection to the ledger, performs one call and maps the outcome to
//! a JSON response.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{create_router, AppState};
pub use server::{run_server, start_background_server};
