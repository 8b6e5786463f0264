//! # Shimroute Test
//!
//! Test utilities for shimroute, for exercising routers, middleware and
//! ledger helpers without a running peer.
//!
//! ## Key Features
//!
//! - **In-Memory Host**: [`MockStub`] implements `ChaincodeStub` over a sorted map
//! - **Fixtures**: Builders for arguments, timestamps, creators and query results
//! - **Identities**: Self-signed creator certificates via `rcgen`
//! - **Response Assertions**: Chainable checks on status, message and payload
//!
//! ## Example
//!
//! ```
//! use shimroute_core::{ChaincodeStub, Context, Handler, Response, handler_fn};
//! use shimroute_test::{MockStub, TestResponse};
//!
//! let stub = MockStub::new("assets").with_args("ping", ["x"]);
//! let handler = handler_fn(|_stub, args, _ctx| Response::ok(args.concat().into_bytes()));
//!
//! let (_, args) = stub.function_and_parameters();
//! let rsp = TestResponse::from(handler.call(&stub, &args, &mut Context::new()));
//! rsp.assert_ok().assert_payload_eq("x");
//! ```

#![doc(html_root_url = "https://docs.rs/shimroute-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod identity;
mod response;
mod stub;

pub use error::TestError;
pub use response::TestResponse;
pub use stub::MockStub;
