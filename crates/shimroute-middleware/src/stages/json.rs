//! JSON argument parser.
//!
//! Parses one argument as JSON into a typed value and stores it in the call
//! context. The value is stored as an `Arc<T>`, so later readers share it
//! rather than copying it.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use shimroute_core::{ChaincodeStub, Context, InvokeError, Response};

use crate::middleware::{Middleware, Next};

/// Middleware that parses a JSON argument into the context.
///
/// # Errors (as responses)
///
/// - `500` when `arg_index` is beyond the supplied arguments
/// - `400` when the argument is not valid JSON for `T`
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde::Deserialize;
/// use shimroute_core::{handler_fn, Response};
/// use shimroute_middleware::{compose, JsonParser, Middleware};
///
/// #[derive(Deserialize)]
/// struct Asset {
///     id: String,
/// }
///
/// let handler = compose(
///     Arc::new(handler_fn(|_stub, _args, ctx| {
///         let asset = ctx.get::<Arc<Asset>>("asset").expect("parsed by middleware");
///         Response::ok(asset.id.clone().into_bytes())
///     })),
///     vec![JsonParser::<Asset>::new(0, "asset").boxed()],
/// );
/// # let _ = handler;
/// ```
pub struct JsonParser<T> {
    arg_index: usize,
    context_key: String,
    _target: PhantomData<fn() -> T>,
}

impl<T> JsonParser<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Creates a parser for the argument at `arg_index`, storing under `context_key`.
    pub fn new(arg_index: usize, context_key: impl Into<String>) -> Self {
        Self {
            arg_index,
            context_key: context_key.into(),
            _target: PhantomData,
        }
    }

    /// Returns the argument position this parser reads.
    #[must_use]
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    /// Returns the key the parsed value is stored under.
    #[must_use]
    pub fn context_key(&self) -> &str {
        &self.context_key
    }
}

impl<T> Clone for JsonParser<T> {
    fn clone(&self) -> Self {
        Self {
            arg_index: self.arg_index,
            context_key: self.context_key.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonParser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonParser")
            .field("arg_index", &self.arg_index)
            .field("context_key", &self.context_key)
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Middleware for JsonParser<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "json_parser"
    }

    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response {
        let Some(raw) = args.get(self.arg_index) else {
            let err = InvokeError::ArgIndex {
                operation: "error unmarshalling json",
                index: self.arg_index,
                len: args.len(),
            };
            tracing::error!(call_id = %ctx.call_id(), error = %err, "json argument missing");
            return err.into();
        };

        let value: T = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                let err = InvokeError::Json(e);
                tracing::error!(
                    call_id = %ctx.call_id(),
                    arg_index = self.arg_index,
                    error = %err,
                    "json argument rejected"
                );
                return err.into();
            }
        };

        ctx.insert(self.context_key.clone(), Arc::new(value));
        next.run(stub, args, ctx)
    }
}
