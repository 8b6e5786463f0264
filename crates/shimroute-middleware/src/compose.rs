//! Wrapping a handler in middleware.
//!
//! [`compose`] turns a handler and an ordered list of middleware into a new
//! handler. Nothing runs at composition time; the returned handler runs the
//! middleware in the order given, then the original handler.

use std::sync::Arc;

use shimroute_core::{BoxedHandler, ChaincodeStub, Context, Handler, Response};

use crate::middleware::{BoxedMiddleware, Next};

/// A handler wrapped in an ordered middleware chain.
pub struct Composed {
    middleware: Vec<BoxedMiddleware>,
    handler: BoxedHandler,
}

impl Composed {
    /// Returns the names of the wrapping middleware, outermost first.
    #[must_use]
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.iter().map(|mw| mw.name()).collect()
    }
}

impl Handler for Composed {
    fn call(&self, stub: &dyn ChaincodeStub, args: &[String], ctx: &mut Context) -> Response {
        Next::new(&self.middleware, self.handler.as_ref()).run(stub, args, ctx)
    }
}

/// Wraps `handler` so that `middleware` runs first, in order.
///
/// An empty list returns `handler` itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use shimroute_core::{handler_fn, BoxedHandler, Response};
/// use shimroute_middleware::compose;
///
/// let handler: BoxedHandler = Arc::new(handler_fn(|_stub, _args, _ctx| Response::ok(Vec::new())));
/// let same = compose(handler.clone(), Vec::new());
/// assert!(Arc::ptr_eq(&handler, &same));
/// ```
pub fn compose(handler: BoxedHandler, middleware: Vec<BoxedMiddleware>) -> BoxedHandler {
    if middleware.is_empty() {
        return handler;
    }
    Arc::new(Composed {
        middleware,
        handler,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{middleware_fn, Middleware};
    use shimroute_core::handler_fn;
    use shimroute_test::MockStub;

    const KEY: &str = "test";

    fn appender(val: i32) -> BoxedMiddleware {
        middleware_fn("appender", move |stub, args, ctx, next| {
            ctx.get_or_default::<Vec<i32>>(KEY).unwrap().push(val);
            next.run(stub, args, ctx)
        })
        .boxed()
    }

    fn handler_appender(val: i32) -> BoxedHandler {
        Arc::new(handler_fn(move |_stub, _args, ctx| {
            ctx.get_or_default::<Vec<i32>>(KEY).unwrap().push(val);
            Response::success(200, Vec::new())
        }))
    }

    #[test]
    fn test_handler_use_runs_in_declaration_order() {
        let stub = MockStub::new("test");
        let h = compose(handler_appender(3), vec![appender(1), appender(2)]);

        let mut ctx = Context::new();
        h.call(&stub, &[], &mut ctx);

        assert_eq!(ctx.get::<Vec<i32>>(KEY), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_nested_composition_runs_outer_first() {
        let stub = MockStub::new("test");
        let inner = compose(handler_appender(4), vec![appender(2), appender(3)]);
        let outer = compose(inner, vec![appender(1)]);

        let mut ctx = Context::new();
        outer.call(&stub, &[], &mut ctx);

        assert_eq!(ctx.get::<Vec<i32>>(KEY), Some(&vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_empty_composition_is_identity() {
        let stub = MockStub::new("test");
        let args = vec!["a".to_string()];
        let handler: BoxedHandler = Arc::new(handler_fn(|_stub, args, _ctx| {
            Response::ok(args.join("").into_bytes())
        }));

        let composed = compose(handler.clone(), Vec::new());
        assert!(Arc::ptr_eq(&handler, &composed));
        assert_eq!(
            composed.call(&stub, &args, &mut Context::new()),
            handler.call(&stub, &args, &mut Context::new())
        );
    }

    #[test]
    fn test_short_circuit_stops_downstream_effects() {
        let stub = MockStub::new("test");
        let stop = middleware_fn("stop", |_stub, _args, ctx, _next| {
            ctx.get_or_default::<Vec<i32>>(KEY).unwrap().push(2);
            Response::error(401, "stopped")
        })
        .boxed();
        let h = compose(handler_appender(4), vec![appender(1), stop, appender(3)]);

        let mut ctx = Context::new();
        let rsp = h.call(&stub, &[], &mut ctx);

        assert_eq!(rsp, Response::error(401, "stopped"));
        assert_eq!(ctx.get::<Vec<i32>>(KEY), Some(&vec![1, 2]));
    }

    #[test]
    fn test_response_propagates_unmodified() {
        let stub = MockStub::new("test");
        let handler: BoxedHandler = Arc::new(handler_fn(|_stub, _args, _ctx| {
            Response::success(207, b"payload".to_vec())
        }));
        let h = compose(handler, vec![appender(1), appender(2)]);

        let rsp = h.call(&stub, &[], &mut Context::new());
        assert_eq!(rsp, Response::success(207, b"payload".to_vec()));
    }

    #[test]
    fn test_middleware_names() {
        let composed = Composed {
            middleware: vec![appender(1), crate::ArgCounter::new(["a"]).boxed()],
            handler: handler_appender(0),
        };
        assert_eq!(composed.middleware_names(), vec!["appender", "arg_counter"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn middleware_runs_in_declaration_order(values in proptest::collection::vec(any::<i32>(), 0..12)) {
                let stub = MockStub::new("test");
                let chain = values.iter().copied().map(appender).collect();
                let h = compose(handler_appender(i32::MIN), chain);

                let mut ctx = Context::new();
                h.call(&stub, &[], &mut ctx);

                let mut expected = values.clone();
                expected.push(i32::MIN);
                prop_assert_eq!(ctx.get::<Vec<i32>>(KEY), Some(&expected));
            }
        }
    }
}
