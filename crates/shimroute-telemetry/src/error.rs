//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or filter directive could not be parsed.
    #[error("invalid log filter \"{filter}\": {reason}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A global subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}
