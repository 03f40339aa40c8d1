//! Vote store error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

/// Errors that can occur in the vote store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob was not valid JSON
    #[error("Malformed stored data: {0}")]
    Malformed(String),

    /// A persisted configuration parsed but violates the data model
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The storage backend rejected a write
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidConfig("duplicate item id".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: duplicate item id");
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Malformed(_)));
    }
}
