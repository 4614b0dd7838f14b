//! Error types for the Endpoint Data Preparer
//!
//! Provides structured error types for template rendering, ground-truth
//! correlation, and the file-handling plumbing around them. Payload shape
//! violations are deliberately *not* errors; they are data returned by the
//! validator (see [`crate::engine`]).

use thiserror::Error;

/// Main error type for preparer operations
#[derive(Error, Debug)]
pub enum PreparerError {
    /// The template references placeholders with no matching record field
    #[error("placeholder(s) {placeholders:?} cannot be found in the input record")]
    PlaceholderMissing {
        /// Names of the placeholders (without the `###<...>` marker) that
        /// have no corresponding field in the record
        placeholders: Vec<String>,
    },

    /// The substituted template is not valid JSON
    #[error("substituted template is not valid JSON ({detail}); rendered text: {rendered}")]
    MalformedPayload {
        /// Parser diagnostic
        detail: String,
        /// The fully substituted text, surfaced for template debugging
        rendered: String,
    },

    /// A configured additional column is absent from a record
    #[error("column '{0}' specified as an additional column doesn't exist in the input record")]
    MissingColumn(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Record or payload parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PreparerError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PreparerError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        PreparerError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        PreparerError::ParseError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    ///
    /// Template/record mismatches, malformed templates, and missing columns
    /// are all correctable by the user through configuration or data changes
    /// and are never retried.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PreparerError::PlaceholderMissing { .. }
                | PreparerError::MalformedPayload { .. }
                | PreparerError::MissingColumn(_)
                | PreparerError::InvalidInput(_)
                | PreparerError::FileError(_)
                | PreparerError::ParseError(_)
        )
    }
}

impl From<std::io::Error> for PreparerError {
    fn from(err: std::io::Error) -> Self {
        PreparerError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for PreparerError {
    fn from(err: serde_json::Error) -> Self {
        PreparerError::ParseError(format!("JSON error: {}", err))
    }
}

/// Result type alias for preparer operations
pub type Result<T> = std::result::Result<T, PreparerError>;
