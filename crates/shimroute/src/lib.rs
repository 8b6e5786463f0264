//! # Shimroute
//!
//! **Function routing and middleware chains for chaincode invocations**
//!
//! A chaincode receives every transaction through a single invoke entry
//! point. Shimroute maps the invoked function name to a handler, runs the
//! call through a global middleware chain and then the handler's own chain,
//! and hands the handler a per-call [`Context`](core::Context) filled in by
//! the middleware.
//!
//! ## Quick Start
//!
//! ```rust
//! use shimroute::prelude::*;
//!
//! let mut router = Router::new();
//! router.register_handler(
//!     "greet",
//!     handler_fn(|_stub, args, _ctx| Response::ok(format!("hello {}", args[0]))),
//!     vec![ArgCounter::new(["name"]).boxed()],
//! );
//!
//! assert!(router.contains("greet"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! invoke → lookup → global middleware → handler middleware → handler
//!                                                               ↓
//! Response ←──────────── (propagates back unmodified) ←─────────┘
//! ```
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`core`] | `Response`, `Context`, `Handler`, `ChaincodeStub`, errors |
//! | [`middleware`] | `Middleware`, `Next`, `compose`, built-in stages |
//! | [`router`] | `Router` |
//! | [`ledger`] | JSON state helpers and creator certificate access |
//! | [`config`] | `ShimrouteConfig` and `ConfigLoader` |
//! | [`telemetry`] | `init_logging` and log field names |

#![doc(html_root_url = "https://docs.rs/shimroute/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bootstrap;

pub use bootstrap::{bootstrap, BootstrapError};

// Re-export member crates
pub use shimroute_config as config;
pub use shimroute_core as core;
pub use shimroute_ledger as ledger;
pub use shimroute_middleware as middleware;
pub use shimroute_router as router;
pub use shimroute_telemetry as telemetry;

pub use shimroute_config::{ConfigLoader, ShimrouteConfig};
pub use shimroute_router::Router;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use shimroute::prelude::*;
/// ```
pub mod prelude {
    pub use shimroute_core::{
        handler_fn, BoxedHandler, ChaincodeStub, Context, ContextScope, Handler, InvokeError,
        Response, StubError,
    };

    pub use shimroute_middleware::{
        compose, middleware_fn, ArgCounter, BoxedMiddleware, JsonParser, Middleware, Next,
        TimestampParser,
    };

    pub use shimroute_ledger::{
        creator_cert, creator_common_name, get_json, put_json, query_json, LedgerError,
    };

    pub use shimroute_router::Router;

    pub use crate::{bootstrap, BootstrapError};
}
