//! Translation error types.

use thiserror::Error;

/// Dictionary cache and translation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// Dictionary not present in the cache
    #[error("Dictionary '{dict}' not found")]
    UnknownDictionary { dict: String },

    /// Code not present in an existing dictionary
    #[error("Code '{code}' not found in dictionary '{dict}'")]
    UnknownCode { dict: String, code: String },

    /// Field not addressable on the target type
    #[error("Field '{field}' not found on type '{owner}'")]
    FieldNotFound { owner: String, field: String },

    /// Value could not be stored into a field
    #[error("Type mismatch on field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: String,
        got: String,
    },

    /// Worker task panicked or failed before completing
    #[error("Task execution failed: {0}")]
    ExecutionFailure(String),

    /// Worker task was cancelled or its result channel dropped
    #[error("Task cancelled")]
    Cancelled,

    /// Entry ingestion error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid session configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, DictError>;

impl From<serde_json::Error> for DictError {
    fn from(e: serde_json::Error) -> Self {
        DictError::Serialization(e.to_string())
    }
}
