//! Handler trait for call processing.
//!
//! A [`Handler`] is the terminal unit of work for a registered function
//! name. Handlers of different concrete types are stored together as
//! [`BoxedHandler`] trait objects.

use std::sync::Arc;

use crate::{ChaincodeStub, Context, Response};

/// The terminal unit of work for a call.
///
/// Handlers receive the host stub, the call's ordered arguments and the
/// call context, and must turn any failure into an error [`Response`].
///
/// # Example
///
/// ```
/// use shimroute_core::{ChaincodeStub, Context, Handler, Response};
///
/// struct Echo;
///
/// impl Handler for Echo {
///     fn call(&self, _stub: &dyn ChaincodeStub, args: &[String], _ctx: &mut Context) -> Response {
///         Response::ok(args.join(" ").into_bytes())
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles one call.
    fn call(&self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response;
}

/// A type-erased handler shared by the registry and composed chains.
pub type BoxedHandler = Arc<dyn Handler>;

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn call(&self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response {
        (**self).call(stub, args, ctx)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn call(&self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response {
        (**self).call(stub, args, ctx)
    }
}

/// A handler backed by a function or closure.
///
/// Build one with [`handler_fn`] so the closure's argument types are
/// inferred.
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context) -> Response + Send + Sync + 'static,
{
    /// Wraps a function as a handler.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context) -> Response + Send + Sync + 'static,
{
    fn call(&self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response {
        (self.func)(stub, args, ctx)
    }
}

/// Wraps a function or closure as a [`Handler`].
///
/// # Example
///
/// ```
/// use shimroute_core::{handler_fn, Response};
///
/// let handler = handler_fn(|_stub, args, _ctx| {
///     Response::ok(args.concat().into_bytes())
/// });
/// # let _ = handler;
/// ```
pub const fn handler_fn<F>(func: F) -> FnHandler<F>
where
    F: Fn(&dyn ChaincodeStub, &[String], &mut Context) -> Response + Send + Sync + 'static,
{
    FnHandler::new(func)
}
