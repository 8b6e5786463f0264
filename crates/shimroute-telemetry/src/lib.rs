//! Logging setup for shimroute.
//!
//! shimroute emits `tracing` events and spans from the router and the
//! built-in middleware. This crate installs the subscriber that renders them:
//!
//! - **JSON lines** for production log pipelines
//! - **Pretty output** with span events and source locations for development
//! - **Filter directives** in `EnvFilter` syntax
//!
//! # Example
//!
//! ```rust,no_run
//! use shimroute_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production()).expect("logging initialised once");
//! ```

#![doc(html_root_url = "https://docs.rs/shimroute-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
