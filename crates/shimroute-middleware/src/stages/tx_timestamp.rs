//! Transaction timestamp extractor.

use shimroute_core::{ChaincodeStub, Context, InvokeError, Response, StubError};

use crate::middleware::{Middleware, Next};

/// Middleware that stores the host's transaction timestamp in the context.
///
/// The value is a `chrono::DateTime<Utc>`. A stub that cannot supply the
/// timestamp, or supplies one outside chrono's range, yields a `500`.
#[derive(Debug, Clone)]
pub struct TxTimestamp {
    context_key: String,
}

impl TxTimestamp {
    /// Creates an extractor storing under `context_key`.
    pub fn new(context_key: impl Into<String>) -> Self {
        Self {
            context_key: context_key.into(),
        }
    }

    /// Returns the key the timestamp is stored under.
    #[must_use]
    pub fn context_key(&self) -> &str {
        &self.context_key
    }
}

impl Middleware for TxTimestamp {
    fn name(&self) -> &'static str {
        "tx_timestamp"
    }

    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response {
        let ts = stub.tx_timestamp().and_then(|ts| {
            ts.to_datetime().ok_or_else(|| {
                StubError::unavailable(format!(
                    "timestamp {}s {}ns out of range",
                    ts.seconds, ts.nanos
                ))
            })
        });

        match ts {
            Ok(ts) => {
                ctx.insert(self.context_key.clone(), ts);
                next.run(stub, args, ctx)
            }
            Err(e) => {
                let err = InvokeError::TxTimestamp(e);
                tracing::error!(
                    call_id = %ctx.call_id(),
                    tx_id = stub.tx_id(),
                    error = %err,
                    "transaction timestamp unavailable"
                );
                err.into()
            }
        }
    }
}
