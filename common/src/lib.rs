//! finledger Common Types
//!
//! This crate contains the types shared across the finledger workspace:
//! identifiers, the transaction record, and the ledger error taxonomy.

pub mod error;
pub mod identifiers;
pub mod transaction;

pub use error::*;
pub use identifiers::*;
pub use transaction::*;
