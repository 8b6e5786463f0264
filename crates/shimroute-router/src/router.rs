//! The function registry and dispatcher.
//!
//! This module provides the [`Router`] struct, which maps function names to
//! composed handlers and runs every call through the global middleware
//! chain.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};
use shimroute_core::{
    BoxedHandler, CallId, ChaincodeStub, Context, ContextScope, Handler, InvokeError, Response,
};
use shimroute_middleware::{compose, BoxedMiddleware, Next};

/// Routes calls to registered handlers by function name.
///
/// Registration happens through `&mut self` during setup. Dispatch takes
/// `&self`, so a fully built router can be shared across threads.
///
/// # Example
///
/// ```rust
/// use shimroute_core::{handler_fn, Response};
/// use shimroute_middleware::{ArgCounter, Middleware};
/// use shimroute_router::Router;
/// use shimroute_test::MockStub;
///
/// let mut router = Router::new();
/// router.register_handler(
///     "greet",
///     handler_fn(|_stub, args, _ctx| Response::ok(format!("hello {}", args[0]).into_bytes())),
///     vec![ArgCounter::new(["name"]).boxed()],
/// );
///
/// let stub = MockStub::new("cc").with_args("greet", ["alice"]);
/// let rsp = router.invoke(&stub);
/// assert_eq!(rsp.payload().as_ref(), b"hello alice");
/// ```
///
/// # Execution Order
///
/// For a call to a function registered with middleware `[m1, m2]` on a
/// router whose global chain is `[g1]`, the order is:
///
/// 1. `g1`
/// 2. `m1`
/// 3. `m2`
/// 4. the handler
///
/// Any stage may answer without delegating; later stages then never run.
pub struct Router {
    /// Composed handlers by function name
    handlers: HashMap<String, BoxedHandler>,
    /// Middleware applied to every call, outermost first
    middleware: Vec<BoxedMiddleware>,
    /// Context discipline
    scope: ContextScope,
    /// The one context used under `ContextScope::Shared`
    shared: Option<Mutex<Context>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates an empty router with a fresh context per call.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scope(ContextScope::PerCall)
    }

    /// Creates an empty router with the given context discipline.
    #[must_use]
    pub fn with_scope(scope: ContextScope) -> Self {
        let shared = match scope {
            ContextScope::PerCall => None,
            ContextScope::Shared => Some(Mutex::new(Context::new())),
        };
        Self {
            handlers: HashMap::new(),
            middleware: Vec::new(),
            scope,
            shared,
        }
    }

    /// Returns the context discipline.
    #[must_use]
    pub fn scope(&self) -> ContextScope {
        self.scope
    }

    /// Appends middleware to the global chain.
    ///
    /// Global middleware runs before the call-specific middleware of every
    /// handler, in the order it was added.
    pub fn use_middleware(&mut self, middleware: Vec<BoxedMiddleware>) -> &mut Self {
        for mw in &middleware {
            tracing::debug!(middleware = mw.name(), "global middleware added");
        }
        self.middleware.extend(middleware);
        self
    }

    /// Registers `handler` under `name`, wrapped in `middleware`.
    ///
    /// A later registration under the same name replaces the earlier one.
    /// Returns the composed handler.
    pub fn register_handler<H: Handler>(
        &mut self,
        name: impl Into<String>,
        handler: H,
        middleware: Vec<BoxedMiddleware>,
    ) -> BoxedHandler {
        let name = name.into();
        let middleware_count = middleware.len();
        let composed = compose(Arc::new(handler), middleware);

        let replaced = self
            .handlers
            .insert(name.clone(), Arc::clone(&composed))
            .is_some();
        tracing::debug!(
            function = %name,
            middleware = middleware_count,
            replaced,
            "handler registered"
        );
        composed
    }

    /// Returns the composed handler registered under `name`.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&BoxedHandler> {
        self.handlers.get(name)
    }

    /// Returns true if a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns the registered function names, sorted.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns the length of the global chain.
    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }

    /// Returns the names of the global middleware, outermost first.
    #[must_use]
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.iter().map(|mw| mw.name()).collect()
    }

    /// Locks and returns the shared context.
    ///
    /// Returns `None` under `ContextScope::PerCall`. Calling this from inside
    /// a handler of the same router deadlocks.
    pub fn shared_context(&self) -> Option<MutexGuard<'_, Context>> {
        self.shared.as_ref().map(|shared| shared.lock())
    }

    /// Dispatches the call described by `stub`.
    pub fn invoke(&self, stub: &dyn ChaincodeStub) -> Response {
        let (function, args) = stub.function_and_parameters();
        self.dispatch(stub, &function, &args)
    }

    /// Dispatches `function` with `args`.
    ///
    /// An unregistered function yields a `400` error response. Every other
    /// response comes unmodified from the chain.
    pub fn dispatch(&self, stub: &dyn ChaincodeStub, function: &str, args: &[String]) -> Response {
        let call_id = CallId::new();
        let span = tracing::info_span!(
            "invoke",
            function = %function,
            call_id = %call_id,
            tx_id = %stub.tx_id(),
        );

        span.in_scope(|| {
            let Some(handler) = self.handlers.get(function) else {
                let err = InvokeError::UnknownFunction(function.to_string());
                tracing::error!(error = %err, "no handler registered");
                return Response::from(err);
            };

            let start = Instant::now();
            let rsp = self.run(stub, handler.as_ref(), args, call_id);
            tracing::debug!(
                status = rsp.status(),
                duration_us = start.elapsed().as_micros() as u64,
                "invoke completed"
            );
            rsp
        })
    }

    fn run(
        &self,
        stub: &dyn ChaincodeStub,
        handler: &dyn Handler,
        args: &[String],
        call_id: CallId,
    ) -> Response {
        let next = Next::new(&self.middleware, handler);
        match &self.shared {
            Some(shared) => {
                let mut ctx = shared.lock();
                ctx.set_call_id(call_id);
                next.run(stub, args, &mut ctx)
            }
            None => next.run(stub, args, &mut Context::with_call_id(call_id)),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("functions", &self.function_names())
            .field("middleware", &self.middleware_names())
            .field("scope", &self.scope)
            .finish()
    }
}
