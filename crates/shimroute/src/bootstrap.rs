//! Turning a loaded configuration into a ready router.

use shimroute_config::{ConfigError, ShimrouteConfig};
use shimroute_router::Router;
use shimroute_telemetry::{init_logging, TelemetryError};
use thiserror::Error;

/// Errors raised while bootstrapping.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The logging subsystem could not be installed.
    #[error("telemetry initialization failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Validates `config`, installs the global logger and returns an empty
/// router with the configured context scope.
///
/// Call once per process; a second call fails with
/// [`BootstrapError::Telemetry`] unless logging is disabled.
///
/// # Example
///
/// ```no_run
/// use shimroute::{bootstrap, ConfigLoader};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConfigLoader::new().with_env_prefix("SHIMROUTE").load()?;
/// let mut router = bootstrap(&config)?;
/// # let _ = &mut router;
/// # Ok(())
/// # }
/// ```
pub fn bootstrap(config: &ShimrouteConfig) -> Result<Router, BootstrapError> {
    config.validate()?;
    init_logging(&config.logging.to_log_config())?;

    tracing::debug!(
        context_scope = ?config.router.context_scope,
        level = %config.logging.level,
        "router bootstrapped"
    );

    Ok(Router::with_scope(config.router.context_scope))
}
