//! Custom error types for allowance-cli
//!
//! The allowance engine itself never fails; these errors cover the storage,
//! configuration and command layers wrapped around it.

use thiserror::Error;

/// The main error type for allowance-cli operations
#[derive(Error, Debug)]
pub enum AllowanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV import/export errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AllowanceError {
    /// Create a "not found" error for purchases
    pub fn purchase_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Purchase",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for AllowanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AllowanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for AllowanceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for allowance-cli operations
pub type AllowanceResult<T> = Result<T, AllowanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AllowanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AllowanceError::purchase_not_found("pur-1234abcd");
        assert_eq!(err.to_string(), "Purchase not found: pur-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AllowanceError = io_err.into();
        assert!(matches!(err, AllowanceError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: AllowanceError = json_err.into();
        assert!(matches!(err, AllowanceError::Json(_)));
    }
}
