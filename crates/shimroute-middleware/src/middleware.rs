//! Core middleware trait and types.
//!
//! This module defines the [`Middleware`] trait and the [`Next`]
//! continuation that links a middleware to the rest of its chain.
//!
//! # Example
//!
//! ```
//! use shimroute_core::{ChaincodeStub, Context, Response};
//! use shimroute_middleware::{Middleware, Next};
//!
//! struct RequireArgs;
//!
//! impl Middleware for RequireArgs {
//!     fn name(&self) -> &'static str {
//!         "require_args"
//!     }
//!
//!     fn process(
//!         &self,
//!         stub: &dyn ChaincodeStub,
//!         args: &[String],
//!         ctx: &mut Context,
//!         next: Next<'_>,
//!     ) -> Response {
//!         if args.is_empty() {
//!             return Response::error(400, "no arguments");
//!         }
//!         next.run(stub, args, ctx)
//!     }
//! }
//! ```

use std::sync::Arc;

use shimroute_core::{ChaincodeStub, Context, Handler, Response};

/// A type-erased middleware that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A pre-processing stage in front of a handler.
///
/// # Invariants
///
/// - Middleware runs `next` at most once; not running it short-circuits the
///   chain and its own response becomes final
/// - Middleware converts its own failures into an error [`Response`]
/// - Middleware only writes to the context it was handed
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this middleware, used in logs.
    fn name(&self) -> &'static str;

    /// Processes one call.
    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response;

    /// Boxes this middleware for registration.
    fn boxed(self) -> BoxedMiddleware
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// Continuation that runs the remainder of a chain.
///
/// `Next` holds the middleware still to run and the terminal handler.
/// It is consumed by [`Next::run`], so it can be run at most once.
pub struct Next<'a> {
    chain: &'a [BoxedMiddleware],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    /// Creates a continuation that runs `chain` in order, then `handler`.
    #[must_use]
    pub fn new(chain: &'a [BoxedMiddleware], handler: &'a dyn Handler) -> Self {
        Self { chain, handler }
    }

    /// Returns the number of middleware left before the handler.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }

    /// Runs the next middleware, or the handler if none are left.
    pub fn run(self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response {
        match self.chain.split_first() {
            Some((middleware, rest)) => {
                tracing::trace!(middleware = middleware.name(), "entering middleware");
                middleware.process(stub, args, ctx, Next::new(rest, self.handler))
            }
            None => self.handler.call(stub, args, ctx),
        }
    }
}

/// A middleware backed by a function or closure.
///
/// Build one with [`middleware_fn`] so the closure's argument types are
/// inferred.
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context, Next<'_>) -> Response
        + Send
        + Sync
        + 'static,
{
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context, Next<'_>) -> Response
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response {
        (self.func)(stub, args, ctx, next)
    }
}

/// Wraps a function or closure as a [`Middleware`].
///
/// # Example
///
/// ```
/// use shimroute_middleware::{middleware_fn, Middleware};
///
/// let audit = middleware_fn("audit", |stub, args, ctx, next| {
///     ctx.insert("audited", true);
///     next.run(stub, args, ctx)
/// });
/// assert_eq!(audit.name(), "audit");
/// ```
pub const fn middleware_fn<F>(name: &'static str, func: F) -> FnMiddleware<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context, Next<'_>) -> Response
        + Send
        + Sync
        + 'static,
{
    FnMiddleware::new(name, func)
}
