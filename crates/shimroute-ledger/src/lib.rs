//! # Shimroute Ledger
//!
//! Helpers handlers use to talk to the ledger through a
//! [`ChaincodeStub`](shimroute_core::ChaincodeStub):
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`put_json`] | Serialise a value and write it under a key |
//! | [`get_json`] | Read a key and deserialise it |
//! | [`query_json`] | Run a rich query and render a JSON result array |
//! | [`creator_cert`] | Decode the transaction creator's certificate |
//! | [`creator_common_name`] | The creator certificate's subject CN |
//!
//! All helpers return [`LedgerError`] on failure; turning that into a
//! response is left to the handler.
//!
//! ## Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use shimroute_ledger::{get_json, put_json};
//! use shimroute_test::MockStub;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Asset {
//!     owner: String,
//! }
//!
//! let stub = MockStub::new("assets");
//! put_json(&stub, "a1", &Asset { owner: "alice".into() }).unwrap();
//!
//! let asset: Asset = get_json(&stub, "a1").unwrap();
//! assert_eq!(asset.owner, "alice");
//! ```

#![doc(html_root_url = "https://docs.rs/shimroute-ledger/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod identity;
mod state;

pub use error::{LedgerError, LedgerResult};
pub use identity::{creator_cert, creator_common_name, CreatorCert};
pub use state::{get_json, put_json, query_json};
