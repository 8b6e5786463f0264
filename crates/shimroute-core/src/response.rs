//! The response returned by every call.
//!
//! A [`Response`] mirrors the host runtime's response message: a numeric
//! status, a message (used by errors) and a payload (used by successes).
//! It derives [`prost::Message`], so the encoded form is the one the host
//! expects on the wire.

use bytes::Bytes;
use http::StatusCode;

use crate::error::InvokeError;

/// Statuses at or above this value are errors.
pub const ERROR_THRESHOLD: i32 = 400;

/// The result of an invoke call.
///
/// Build it with [`Response::success`] or [`Response::error`]; it is never
/// mutated afterwards.
///
/// # Example
///
/// ```
/// use shimroute_core::Response;
///
/// let ok = Response::success(201, b"created".to_vec());
/// assert_eq!(ok.status(), 201);
/// assert!(ok.message().is_empty());
///
/// let err = Response::error(404, "no such asset");
/// assert!(err.payload().is_empty());
/// assert!(!err.is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Response {
    #[prost(int32, tag = "1")]
    status: i32,
    #[prost(string, tag = "2")]
    message: String,
    #[prost(bytes = "bytes", tag = "3")]
    payload: Bytes,
}

impl Response {
    /// Creates a success response with the given status and payload.
    pub fn success(status: i32, payload: impl Into<Bytes>) -> Self {
        Self {
            status,
            message: String::new(),
            payload: payload.into(),
        }
    }

    /// Creates an error response with the given status and message.
    pub fn error(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: Bytes::new(),
        }
    }

    /// Creates a `200 OK` success response.
    pub fn ok(payload: impl Into<Bytes>) -> Self {
        Self::success(i32::from(StatusCode::OK.as_u16()), payload)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Returns the message (empty for successes).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the payload (empty for errors).
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Returns true when the status is below the host's error threshold.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status < ERROR_THRESHOLD
    }

    /// Splits the response into `(status, message, payload)`.
    #[must_use]
    pub fn into_parts(self) -> (i32, String, Bytes) {
        (self.status, self.message, self.payload)
    }
}

impl From<InvokeError> for Response {
    fn from(err: InvokeError) -> Self {
        Self::error(err.category().status(), err.to_string())
    }
}
