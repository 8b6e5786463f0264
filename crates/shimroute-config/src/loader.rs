//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use shimroute_core::ContextScope;

use crate::{ConfigError, LogFormat, ShimrouteConfig};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables named `PREFIX__SECTION__KEY`
///
/// # Example
///
/// ```no_run
/// use shimroute_config::ConfigLoader;
///
/// # fn main() -> Result<(), shimroute_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("shimroute.toml")?
///     .with_env_prefix("SHIMROUTE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: ShimrouteConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use shimroute_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = ShimrouteConfig::development();
        self
    }

    /// Load configuration from a `.toml` or `.json` file.
    ///
    /// The file replaces the configuration loaded so far; sections and
    /// fields it omits take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, malformed,
    /// has an unsupported extension or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.config = parse(&content, format)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use shimroute_config::ConfigLoader;
    /// use shimroute_core::ContextScope;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[router]\ncontext_scope = \"shared\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.router.context_scope, ContextScope::Shared);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// With prefix `SHIMROUTE`, `SHIMROUTE__LOGGING__LEVEL=debug` sets
    /// `logging.level`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load variables from a `.env` file in the current directory, if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<ShimrouteConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix, env::vars())?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the configuration without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ShimrouteConfig {
        self.config
    }

    fn apply_env_overrides<I>(&mut self, prefix: &str, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let scoped = format!("{prefix}__");
        for (key, value) in vars {
            if let Some(path) = key.strip_prefix(&scoped) {
                self.apply_env_var(&key, path, &value)?;
            }
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, path: &str, value: &str) -> Result<(), ConfigError> {
        let parts: Vec<&str> = path.split("__").collect();

        match parts.as_slice() {
            ["ROUTER", "CONTEXT_SCOPE"] => {
                self.config.router.context_scope = match value.to_lowercase().as_str() {
                    "per_call" => ContextScope::PerCall,
                    "shared" => ContextScope::Shared,
                    _ => {
                        return Err(ConfigError::env_var(
                            key,
                            "expected 'per_call' or 'shared'",
                        ))
                    }
                };
            }
            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(key, value)?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_var(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "FILE_LINE_INFO"] => {
                self.config.logging.file_line_info = parse_bool(key, value)?;
            }
            ["LOGGING", "INCLUDE_TARGET"] => {
                self.config.logging.include_target = parse_bool(key, value)?;
            }
            // Unrelated variables sharing the prefix are ignored.
            _ => {}
        }
        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<ShimrouteConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_var(key, "expected a boolean")),
    }
}
