//! Configuration for the office converter.
//!
//! Values are merged from an optional TOML file and environment variables
//! prefixed with `OFFICE_CONVERTER__` (e.g. `OFFICE_CONVERTER__BINARY`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConversionError;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "OFFICE_CONVERTER";

/// Converter configuration.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Executable name or path of the external converter.
    #[validate(length(min = 1))]
    pub binary: String,

    /// Directory for converted output. Defaults to the source directory.
    pub staging_dir: Option<PathBuf>,

    /// Replace `HOME` for the child when the current one is not writable.
    pub prefix_with_export_home: bool,

    /// Value given to `HOME` when it is replaced.
    pub fallback_home: PathBuf,

    /// Kill the converter after this many seconds. Unset waits forever.
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: Option<u64>,

    /// Logging settings used by the command-line front end.
    pub logging: LoggingConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            staging_dir: None,
            prefix_with_export_home: true,
            fallback_home: default_fallback_home(),
            timeout_seconds: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from `path` (if given) and the environment, then
    /// validate it.
    pub fn load(path: Option<&Path>) -> Result<Self, ConversionError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConversionError::Configuration {
                reason: format!("Failed to build config: {e}"),
            })?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConversionError::Configuration {
                reason: format!("Failed to deserialize config: {e}"),
            })?;

        config.validate().map_err(|e| ConversionError::Configuration {
            reason: e.to_string(),
        })?;

        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    pub level: String,
    /// Output style.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// One JSON object per event
    Json,
}

fn default_binary() -> String {
    "libreoffice".to_string()
}

fn default_fallback_home() -> PathBuf {
    PathBuf::from("/tmp")
}
