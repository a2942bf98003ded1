//! Shared error types for the engine
//!
//! Errors follow a category-coded scheme so callers can branch on a stable
//! code rather than on message text:
//! - E001-E009: I/O errors
//! - E010-E019: Input parse errors
//! - E020-E029: Configuration errors
//! - E050-E059: Input contract (validation) errors

use std::fmt;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");
    /// Input could not be decoded
    pub const PARSE_INPUT: ErrorCode = ErrorCode("E010");
    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - unknown COCOMO preset
    pub const CONFIG_UNKNOWN_PRESET: ErrorCode = ErrorCode("E021");
    /// Config error - glob pattern failed to compile
    pub const CONFIG_PATTERN: ErrorCode = ErrorCode("E022");
    /// Validation error - record path breaks the input contract
    pub const VALIDATION_PATH: ErrorCode = ErrorCode("E050");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ways a record path can break the normalized POSIX path contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathViolation {
    Empty,
    Absolute,
    ParentTraversal,
    CurrentDirSegment,
    Backslash,
    EmptySegment,
    TrailingSlash,
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Empty => "path is empty",
            Self::Absolute => "path is absolute",
            Self::ParentTraversal => "path contains '..'",
            Self::CurrentDirSegment => "path contains a '.' segment",
            Self::Backslash => "path contains a backslash",
            Self::EmptySegment => "path contains an empty segment",
            Self::TrailingSlash => "path ends with '/'",
        };
        f.write_str(text)
    }
}

/// Main error type for dirmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A file record violated the input contract
    #[error("Validation error: record #{index} '{path}': {violation}")]
    Validation {
        index: usize,
        path: String,
        violation: PathViolation,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// Unknown COCOMO preset name
    #[error("Configuration error: unknown COCOMO preset '{name}' (valid: {valid})")]
    UnknownPreset { name: String, valid: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A single record in the input document could not be decoded
    #[error("Parse error: record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },

    /// The input document is valid JSON of an unsupported shape
    #[error("Parse error: {0}")]
    InputShape(String),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn validation(index: usize, path: impl Into<String>, violation: PathViolation) -> Self {
        Self::Validation {
            index,
            path: path.into(),
            violation,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    pub fn configuration_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::VALIDATION_PATH,
            Self::Configuration { .. } | Self::Toml(_) => ErrorCode::CONFIG_INVALID,
            Self::UnknownPreset { .. } => ErrorCode::CONFIG_UNKNOWN_PRESET,
            Self::Pattern(_) => ErrorCode::CONFIG_PATTERN,
            Self::Io(_) => ErrorCode::IO_GENERIC,
            Self::Json(_) | Self::InvalidRecord { .. } | Self::InputShape(_) => {
                ErrorCode::PARSE_INPUT
            }
            Self::WithContext { .. } => ErrorCode::IO_GENERIC,
        }
    }

    /// Whether the error came from configuration rather than input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::UnknownPreset { .. } | Self::Pattern(_) | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
