//! LAS Extractor Library
//!
//! A Rust library for converting LAS (Log ASCII Standard) 2.0 and 3.0 well-log
//! files into a normalized well description plus one flat data file per curve.
//!
//! This library provides tools for:
//! - Parsing LAS files in a single pass with section-order validation
//! - Decomposing WELL/PARAMETER header lines and CURVE/definition lines
//! - Streaming data rows into per-curve files, including multi-column array curves
//! - Computing depth range and step with floating-point tolerance
//! - Normalizing decreasing-depth logs into ascending order
//! - Rolling back partial output on any malformed input

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod curve_writer;
        pub mod las_parser;
        pub mod storage;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Curve, CurveFormat, Dataset, ImportData, Parameter, WellField, WellInfo};
pub use app::services::las_parser::{ExtractOutcome, ExtractStats, LasExtractor};
pub use config::ExtractorConfig;

/// Result type alias for the LAS extractor
pub type Result<T> = std::result::Result<T, Error>;

/// Classified reasons a LAS file is rejected
///
/// The `Display` strings are stable and are what callers receive as the
/// rejection message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing version section")]
    MissingVersionSection,

    #[error("missing well section")]
    MissingWellSection,

    #[error("missing definition section")]
    MissingDefinitionSection,

    #[error("missing data section")]
    MissingDataSection,

    /// A metadata line without the `:` separator, or an unusable header
    #[error("wrong format")]
    WrongFormat { line_number: usize },

    #[error("insufficient data for curves")]
    InsufficientData { line_number: usize },

    #[error("more data columns than curves")]
    TooManyColumns { line_number: usize },

    /// Anything unexpected while handling a line or finalizing output
    #[error("extract failed: {reason}")]
    ExtractFailed { reason: String },
}

/// Error types for LAS extraction operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input was rejected as a LAS file
    #[error(transparent)]
    Format(#[from] FormatError),

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Create an "extract failed" format error
    pub fn extract_failed(reason: impl Into<String>) -> Self {
        Self::Format(FormatError::ExtractFailed {
            reason: reason.into(),
        })
    }

    /// The classified format error, if this is a rejection of the input
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format(format_error) => Some(format_error),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
