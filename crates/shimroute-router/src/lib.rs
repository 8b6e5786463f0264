//! Function-name router for shimroute.
//!
//! This crate maps the function name of an incoming call to a registered
//! handler and runs the call through two layers of middleware: a global
//! chain shared by every function, then the function's own chain.
//!
//! # Features
//!
//! - **Name Dispatch**: O(1) lookup of the invoked function
//! - **Layered Middleware**: Global middleware wraps call-specific middleware
//! - **Context Scoping**: Fresh context per call, or one shared context
//! - **Thread-Safe Dispatch**: A built router is `Send + Sync`
//!
//! # Example
//!
//! ```rust
//! use shimroute_core::{handler_fn, ContextScope, Response};
//! use shimroute_middleware::{middleware_fn, Middleware};
//! use shimroute_router::Router;
//! use shimroute_test::MockStub;
//!
//! let mut router = Router::with_scope(ContextScope::PerCall);
//! router.use_middleware(vec![middleware_fn("audit", |stub, args, ctx, next| {
//!     ctx.insert("audited", true);
//!     next.run(stub, args, ctx)
//! })
//! .boxed()]);
//! router.register_handler(
//!     "ping",
//!     handler_fn(|_stub, _args, ctx| {
//!         let audited = ctx.get::<bool>("audited").copied().unwrap_or(false);
//!         Response::ok(audited.to_string().into_bytes())
//!     }),
//!     vec![],
//! );
//!
//! let rsp = router.invoke(&MockStub::new("cc").with_args("ping", Vec::<String>::new()));
//! assert_eq!(rsp.payload().as_ref(), b"true");
//! ```
//!
//! # Architecture
//!
//! ```text
//!   invoke(stub)
//!        │
//!   lookup(function) ──── miss ──▶ 400 "invalid invoke function"
//!        │
//!   global chain  g1 → g2 → …
//!        │
//!   composed handler  m1 → m2 → … → handler
//!        │
//!   Response (unmodified)
//! ```

#![doc(html_root_url = "https://docs.rs/shimroute-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod router;

pub use router::Router;
