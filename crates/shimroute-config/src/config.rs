//! Top-level configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, RouterConfig};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete shimroute configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use shimroute_config::ShimrouteConfig;
/// use shimroute_core::ContextScope;
///
/// let config = ShimrouteConfig::default();
/// assert_eq!(config.router.context_scope, ContextScope::PerCall);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShimrouteConfig {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShimrouteConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `logging.level` is not a known
    /// level and not a filter directive (which contains `=` or `,`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.trim();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!(
                    "unknown level \"{}\", expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            router: RouterConfig::default(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                file_line_info: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}
