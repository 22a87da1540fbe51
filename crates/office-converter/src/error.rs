//! Unified error type for office document conversions.
//!
//! Validation, process execution and configuration failures are all
//! reported through a single `ConversionError` enum. `ErrorKind` gives
//! callers a coarse category without matching every variant.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Coarse error categories for conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The source document was not found.
    NotFound,
    /// The requested input or output format is not supported.
    Validation,
    /// The external converter failed or did not finish in time.
    ExternalService,
    /// The converter configuration is invalid.
    Configuration,
    /// Any other I/O failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Unified error type for all conversion operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Validation errors ---
    /// Source document does not exist.
    #[error("File does not exist: {path}")]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Source extension is not a key of the conversion table.
    #[error("Input file extension not supported: {extension}")]
    UnsupportedInputExtension {
        /// Extension as it appeared on the source file.
        extension: String,
    },

    /// Requested output extension is not allowed for the source format.
    #[error("Output extension ({extension}) not supported for input file ({basename})")]
    UnsupportedConversion {
        /// The requested output extension.
        extension: String,
        /// Basename of the source document.
        basename: String,
    },

    // --- Process execution errors ---
    /// The external converter exited with a non-zero status or could not
    /// be started. Its output is logged, not carried here.
    #[error("Conversion failure! Contact server admin.")]
    ConversionFailed {
        /// Exit code, if the process ran and exited normally.
        code: Option<i32>,
    },

    /// The external converter exceeded the configured timeout.
    #[error("Conversion timed out after {timeout:?}")]
    Timeout {
        /// The limit that was exceeded.
        timeout: Duration,
    },

    // --- Generic errors ---
    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// What was wrong.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedInputExtension { .. } | Self::UnsupportedConversion { .. } => {
                ErrorKind::Validation
            }
            Self::ConversionFailed { .. } | Self::Timeout { .. } => ErrorKind::ExternalService,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Internal,
        }
    }
}
