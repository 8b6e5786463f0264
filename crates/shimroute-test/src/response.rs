//! Response assertions.

use std::fmt;

use serde::de::DeserializeOwned;
use shimroute_core::Response;

use crate::error::TestError;

/// A call response with helper methods for assertions.
///
/// # Example
///
/// ```
/// use shimroute_core::Response;
/// use shimroute_test::TestResponse;
///
/// let rsp = TestResponse::from(Response::ok(br#"{"owner":"alice"}"#.to_vec()));
/// rsp.assert_ok()
///     .assert_json_field("owner", &serde_json::json!("alice"));
/// ```
pub struct TestResponse {
    inner: Response,
}

impl TestResponse {
    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.inner.status()
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.inner.message()
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.inner.payload()
    }

    /// Returns the wrapped response.
    #[must_use]
    pub fn into_inner(self) -> Response {
        self.inner
    }

    /// Returns the payload as a string.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.payload().to_vec())
            .map_err(|e| TestError::PayloadRead(format!("invalid UTF-8: {e}")))
    }

    /// Deserializes the payload as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        serde_json::from_slice(self.payload()).map_err(TestError::Json)
    }

    /// Asserts the status equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the status doesn't match.
    pub fn assert_status(&self, expected: i32) -> &Self {
        assert_eq!(
            self.status(),
            expected,
            "expected status {expected}, got {} ({})",
            self.status(),
            self.message()
        );
        self
    }

    /// Asserts the response is a success (status below 400).
    ///
    /// # Panics
    ///
    /// Panics on an error response.
    pub fn assert_ok(&self) -> &Self {
        assert!(
            self.inner.is_ok(),
            "expected success, got {}: {}",
            self.status(),
            self.message()
        );
        self
    }

    /// Asserts an error response with exactly this status and message.
    ///
    /// # Panics
    ///
    /// Panics if either differs.
    pub fn assert_error(&self, status: i32, message: impl AsRef<str>) -> &Self {
        self.assert_status(status);
        assert_eq!(self.message(), message.as_ref(), "error message mismatch");
        self
    }

    /// Asserts the message contains `expected`.
    ///
    /// # Panics
    ///
    /// Panics if it doesn't.
    pub fn assert_message_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        assert!(
            self.message().contains(expected),
            "message should contain '{expected}', got: {}",
            self.message()
        );
        self
    }

    /// Asserts the payload equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the payload differs.
    pub fn assert_payload_eq(&self, expected: impl AsRef<[u8]>) -> &Self {
        assert_eq!(self.payload(), expected.as_ref(), "payload mismatch");
        self
    }

    /// Asserts that a JSON field in the payload equals `expected`.
    ///
    /// `path` is dot-separated; numeric segments index arrays.
    ///
    /// # Panics
    ///
    /// Panics if the payload is not JSON or the field differs.
    pub fn assert_json_field(&self, path: &str, expected: &serde_json::Value) -> &Self {
        let json: serde_json::Value = match self.json() {
            Ok(json) => json,
            Err(e) => panic!("payload should be valid JSON: {e}"),
        };
        let actual = json_path(&json, path)
            .unwrap_or_else(|| panic!("JSON path '{path}' not found in: {json}"));
        assert_eq!(actual, expected, "JSON field '{path}' mismatch");
        self
    }
}

impl From<Response> for TestResponse {
    fn from(inner: Response) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status())
            .field("message", &self.message())
            .field("payload_len", &self.payload().len())
            .finish()
    }
}

fn json_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match segment.parse::<usize>() {
            Ok(index) => current.get(index)?,
            Err(_) => current.get(segment)?,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response() {
        let rsp = TestResponse::from(Response::ok(b"hello".to_vec()));
        rsp.assert_ok().assert_status(200).assert_payload_eq("hello");
        assert_eq!(rsp.text().unwrap(), "hello");
    }

    #[test]
    fn test_error_response() {
        let rsp = TestResponse::from(Response::error(400, "bad input"));
        rsp.assert_error(400, "bad input")
            .assert_message_contains("bad");
        assert!(rsp.payload().is_empty());
    }

    #[test]
    #[should_panic(expected = "expected success")]
    fn test_assert_ok_panics_on_error() {
        TestResponse::from(Response::error(500, "boom")).assert_ok();
    }

    #[test]
    fn test_json_field() {
        let rsp = TestResponse::from(Response::ok(
            br#"[{"Key":"a","Record":{"n":1}}]"#.to_vec(),
        ));
        rsp.assert_json_field("0.Key", &json!("a"))
            .assert_json_field("0.Record.n", &json!(1));
    }

    #[test]
    fn test_json_path_missing() {
        let value = json!({"a": [1, 2]});
        assert_eq!(json_path(&value, "a.1"), Some(&json!(2)));
        assert_eq!(json_path(&value, "b"), None);
    }
}
