//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named file does not exist.
    #[error("config file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    /// The file exists but could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// Malformed TOML or a field the schema does not know.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON or a field the schema does not know.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither `toml` nor `json`.
    #[error("unsupported config format \"{0}\", expected toml or json")]
    UnsupportedFormat(String),

    /// A value parsed but is not acceptable.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted path of the field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// An override variable holds an unparsable value.
    #[error("environment variable {var}: {reason}")]
    EnvVar {
        /// Variable name.
        var: String,
        /// Expected form.
        reason: &'static str,
    },

    /// A `.env` file exists but is malformed.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn env_var(var: &str, reason: &'static str) -> Self {
        Self::EnvVar {
            var: var.to_string(),
            reason,
        }
    }
}
