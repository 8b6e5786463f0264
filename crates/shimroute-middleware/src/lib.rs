//! # Shimroute Middleware
//!
//! Middleware composition for the shimroute invoke router.
//!
//! A middleware sits in front of a handler. It receives the call's stub,
//! arguments and context together with a [`Next`] continuation, and either
//! runs `Next` or short-circuits with its own response.
//!
//! ```text
//! invoke → global₀ → … → globalₙ → call₀ → … → callₘ → handler
//!                                                          ↓
//! Response ←───────────────────────────────────────────────┘
//! ```
//!
//! ## Built-in stages
//!
//! | Stage               | Purpose                                         |
//! |---------------------|-------------------------------------------------|
//! | [`ArgCounter`]      | Reject calls with the wrong number of arguments |
//! | [`JsonParser`]      | Parse a JSON argument into the context          |
//! | [`TimestampParser`] | Parse a formatted time argument into the context|
//! | [`TxTimestamp`]     | Store the transaction timestamp in the context  |
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use shimroute_core::{handler_fn, Response};
//! use shimroute_middleware::{compose, ArgCounter, Middleware};
//!
//! let handler = compose(
//!     Arc::new(handler_fn(|_stub, args, _ctx| Response::ok(args[0].clone().into_bytes()))),
//!     vec![ArgCounter::new(["name"]).boxed()],
//! );
//! # let _ = handler;
//! ```

#![doc(html_root_url = "https://docs.rs/shimroute-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod compose;
pub mod middleware;
pub mod stages;

// Re-export main types at crate root
pub use compose::{compose, Composed};
pub use middleware::{middleware_fn, BoxedMiddleware, FnMiddleware, Middleware, Next};
pub use stages::{ArgCounter, JsonParser, TimestampParser, TxTimestamp};
