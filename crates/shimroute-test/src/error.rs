//! Test error types.

use thiserror::Error;

/// Errors that can occur while building test fixtures or reading responses.
#[derive(Debug, Error)]
pub enum TestError {
    /// Certificate generation failed
    #[error("certificate error: {0}")]
    Certificate(#[from] rcgen::Error),
    /// Payload reading failed
    #[error("payload read error: {0}")]
    PayloadRead(String),
    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
