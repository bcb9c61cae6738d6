//! Error types for Keepsake
//!
//! Page effects never fail: a missing marker element simply leaves the
//! feature inactive. Errors only arise at the edges, when loading and
//! validating configuration.

use thiserror::Error;

/// Main error type for Keepsake operations
#[derive(Error, Debug)]
pub enum KeepsakeError {
    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds values the effects cannot use
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Page kind name not recognised
    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

/// Result type alias using KeepsakeError
pub type KeepsakeResult<T> = Result<T, KeepsakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeepsakeError::InvalidConfig("popups.messages is empty".to_string());
        assert_eq!(format!("{}", err), "Invalid config: popups.messages is empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KeepsakeError = io_err.into();
        assert!(matches!(err, KeepsakeError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: KeepsakeError = json_err.into();
        assert!(matches!(err, KeepsakeError::Json(_)));
    }
}
