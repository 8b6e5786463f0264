//! Error types for shimroute.
//!
//! [`InvokeError`] covers every failure that the router and the built-in
//! middleware turn into an error [`Response`](crate::Response). Its
//! `Display` output is the exact message the caller sees; its
//! [`ErrorCategory`] decides the status.
//!
//! [`StubError`] is the failure type of the host runtime interface. It is a
//! dependency failure and is propagated as a value, not converted into a
//! response.

use http::StatusCode;
use thiserror::Error;

/// Classification of an invoke failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No handler is registered for the requested function.
    NotFound,
    /// The caller sent malformed input.
    BadRequest,
    /// A precondition of the chain was violated or a dependency failed.
    Internal,
}

impl ErrorCategory {
    /// Returns the HTTP status code for this category.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // An unknown function is the caller's mistake, not a missing resource.
            Self::NotFound | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the status as carried by a [`Response`](crate::Response).
    #[must_use]
    pub fn status(&self) -> i32 {
        i32::from(self.status_code().as_u16())
    }
}

/// Failures raised while dispatching a call.
///
/// # Example
///
/// ```
/// use shimroute_core::{InvokeError, Response};
///
/// let err = InvokeError::ArgumentCount(vec!["a".into(), "b".into()]);
/// assert_eq!(err.to_string(), "incorrect number of arguments, expected 2: a, b");
///
/// let rsp: Response = err.into();
/// assert_eq!(rsp.status(), 400);
/// ```
#[derive(Error, Debug)]
pub enum InvokeError {
    /// No handler is registered under the name.
    #[error("invalid invoke function \"{0}\"")]
    UnknownFunction(String),

    /// The call carried the wrong number of arguments.
    #[error("incorrect number of arguments, expected {}", expected_names(.0))]
    ArgumentCount(Vec<String>),

    /// A middleware was configured to read an argument the call does not have.
    #[error("{operation}: argIndex {index} out of range for {len} args")]
    ArgIndex {
        /// What the middleware was doing, e.g. `error parsing time`.
        operation: &'static str,
        /// The configured index.
        index: usize,
        /// The number of arguments actually supplied.
        len: usize,
    },

    /// An argument was not valid JSON for the target type.
    #[error("error unmarshalling json: {0}")]
    Json(#[source] serde_json::Error),

    /// An argument did not match the configured time format.
    #[error("error parsing time string: {0}")]
    TimeParse(#[source] chrono::ParseError),

    /// The transaction timestamp could not be read from the host.
    #[error("error getting transaction timestamp: {0}")]
    TxTimestamp(#[source] StubError),
}

impl InvokeError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFunction(_) => ErrorCategory::NotFound,
            Self::ArgumentCount(_) | Self::Json(_) | Self::TimeParse(_) => {
                ErrorCategory::BadRequest
            }
            Self::ArgIndex { .. } | Self::TxTimestamp(_) => ErrorCategory::Internal,
        }
    }
}

fn expected_names(names: &[String]) -> String {
    if names.is_empty() {
        "0".to_string()
    } else {
        format!("{}: {}", names.len(), names.join(", "))
    }
}

/// Failures reported by the host runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StubError {
    /// The host could not serve the request.
    #[error("{0}")]
    Unavailable(String),

    /// The call carries no transaction timestamp.
    #[error("transaction timestamp not set")]
    MissingTimestamp,

    /// The call carries no creator identity.
    #[error("creator identity not set")]
    MissingCreator,

    /// The rich query was rejected.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl StubError {
    /// Creates an [`StubError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
