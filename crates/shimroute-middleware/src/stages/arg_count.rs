//! Argument-count guard.
//!
//! Rejects calls whose argument list does not have the expected length. The
//! error names every expected argument so callers can fix the call.

use shimroute_core::{ChaincodeStub, Context, InvokeError, Response};

use crate::middleware::{Middleware, Next};

/// Middleware that checks the number of arguments.
///
/// # Example
///
/// ```
/// use shimroute_middleware::ArgCounter;
///
/// let guard = ArgCounter::new(["owner", "amount"]);
/// assert_eq!(guard.expected(), ["owner", "amount"]);
/// ```
#[derive(Debug, Clone)]
pub struct ArgCounter {
    expected: Vec<String>,
}

impl ArgCounter {
    /// Creates a guard expecting exactly the named arguments, in order.
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the expected argument names.
    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }
}

impl Middleware for ArgCounter {
    fn name(&self) -> &'static str {
        "arg_counter"
    }

    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response {
        if args.len() != self.expected.len() {
            let err = InvokeError::ArgumentCount(self.expected.clone());
            tracing::error!(
                call_id = %ctx.call_id(),
                expected = self.expected.len(),
                actual = args.len(),
                error = %err,
                "argument count mismatch"
            );
            return err.into();
        }

        next.run(stub, args, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimroute_core::handler_fn;
    use shimroute_test::MockStub;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn run(guard: &ArgCounter, call_args: &[String]) -> (Response, bool) {
        let stub = MockStub::new("test");
        let handler = handler_fn(|_stub, _args, ctx| {
            ctx.insert("reached", true);
            Response::success(200, b"next".to_vec())
        });
        let chain = [guard.clone().boxed()];
        let mut ctx = Context::new();
        let rsp = Next::new(&chain, &handler).run(&stub, call_args, &mut ctx);
        (rsp, ctx.contains_key("reached"))
    }

    #[test]
    fn test_too_few_arguments() {
        let (rsp, reached) = run(&ArgCounter::new(["a", "b"]), &args(&["1"]));
        assert_eq!(
            rsp,
            Response::error(400, "incorrect number of arguments, expected 2: a, b")
        );
        assert!(!reached);
    }

    #[test]
    fn test_too_many_arguments() {
        let (rsp, reached) = run(&ArgCounter::new(["a"]), &args(&["1", "2"]));
        assert_eq!(
            rsp,
            Response::error(400, "incorrect number of arguments, expected 1: a")
        );
        assert!(!reached);
    }

    #[test]
    fn test_no_arguments_expected() {
        let (rsp, _) = run(&ArgCounter::new(Vec::<String>::new()), &args(&["x"]));
        assert_eq!(rsp.message(), "incorrect number of arguments, expected 0");

        let (rsp, reached) = run(&ArgCounter::new(Vec::<String>::new()), &[]);
        assert_eq!(rsp.status(), 200);
        assert!(reached);
    }

    #[test]
    fn test_matching_count_delegates() {
        let (rsp, reached) = run(&ArgCounter::new(["a", "b"]), &args(&["1", "2"]));
        assert_eq!(rsp, Response::success(200, b"next".to_vec()));
        assert!(reached);
    }
}
