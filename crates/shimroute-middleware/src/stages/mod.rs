//! Built-in middleware stages.
//!
//! Each stage validates or parses call arguments and stores what it finds in
//! the call [`Context`](shimroute_core::Context) for later stages and the
//! handler.

pub mod arg_count;
pub mod json;
pub mod timestamp;
pub mod tx_timestamp;

pub use arg_count::ArgCounter;
pub use json::JsonParser;
pub use timestamp::TimestampParser;
pub use tx_timestamp::TxTimestamp;
