//! Typed configuration for shimroute routers.
//!
//! This crate provides a small, strongly-typed configuration layer with
//! support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides, optionally seeded from a `.env` file
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use shimroute_config::ConfigLoader;
//!
//! # fn main() -> Result<(), shimroute_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("shimroute.toml")?
//!     .with_dotenv()?
//!     .with_env_prefix("SHIMROUTE")
//!     .load()?;
//!
//! println!("context scope: {:?}", config.router.context_scope);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! context_scope = "per_call"   # or "shared"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"              # or "pretty"
//! file_line_info = false
//! include_target = true
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with variables of the form `PREFIX__SECTION__KEY`:
//!
//! - `SHIMROUTE__ROUTER__CONTEXT_SCOPE=shared`
//! - `SHIMROUTE__LOGGING__LEVEL=debug`
//! - `SHIMROUTE__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::ShimrouteConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, RouterConfig};
