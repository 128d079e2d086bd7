//! finledger Protocol
//!
//! Wire messages exchanged between ledger clients and the server, plus
//! the length-prefixed JSON framing they travel in.

pub mod codec;
pub mod error;
pub mod messages;

pub use codec::{read_frame, write_frame, MAX_FRAME_LEN};
pub use error::{WireError, WireResult};
pub use messages::*;
