//! Configuration schema types.
//!
//! This module defines the structure of each configuration section.

use serde::{Deserialize, Serialize};
use shimroute_core::ContextScope;
use shimroute_telemetry::LogConfig;

/// Router configuration section.
///
/// # Example
///
/// ```
/// use shimroute_config::RouterConfig;
/// use shimroute_core::ContextScope;
///
/// let config: RouterConfig = toml::from_str(r#"context_scope = "shared""#).unwrap();
/// assert_eq!(config.context_scope, ContextScope::Shared);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Whether each call gets a fresh context or all calls share one.
    #[serde(default)]
    pub context_scope: ContextScope,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in events.
    #[serde(default)]
    pub file_line_info: bool,

    /// Include the event target (module path).
    #[serde(default = "default_true")]
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            file_line_info: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Converts into the settings the logging subsystem takes.
    ///
    /// Pretty output also logs span open and close events.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            span_events: self.format == LogFormat::Pretty,
            file_line_info: self.file_line_info,
            include_target: self.include_target,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
