//! # Shimroute Core
//!
//! Core types for the shimroute invoke router.
//!
//! This crate provides the foundational types used throughout shimroute:
//!
//! - [`Response`] - The status/message/payload result of every call
//! - [`ChaincodeStub`] - The host runtime interface a call is delivered through
//! - [`Context`] - Per-call scratch space shared by middleware and handlers
//! - [`Handler`] - The terminal unit of work for a registered function
//! - [`InvokeError`] - Errors that become error responses

#![doc(html_root_url = "https://docs.rs/shimroute-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod handler;
pub mod identity;
mod response;
mod stub;

pub use context::{CallId, Context, ContextScope};
pub use error::{ErrorCategory, InvokeError, StubError};
pub use handler::{handler_fn, BoxedHandler, FnHandler, Handler};
pub use identity::SerializedIdentity;
pub use response::Response;
pub use stub::{ChaincodeStub, StateEntry, StateIter, TxTimestamp};
