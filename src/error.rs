//! Error types for pagify
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagify
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// Pagination input was rejected and no usable fallback was configured.
    ///
    /// The display text is exactly the message configured on the middleware.
    #[error("{message}")]
    InvalidPaginationValues { message: String },

    #[error("Invalid cursor token: {message}")]
    CursorDecode { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid pagination values error
    pub fn invalid_values(message: impl Into<String>) -> Self {
        Self::InvalidPaginationValues {
            message: message.into(),
        }
    }

    /// Create a cursor decode error
    pub fn cursor_decode(message: impl Into<String>) -> Self {
        Self::CursorDecode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error rejects the client's pagination input
    pub fn is_invalid_values(&self) -> bool {
        matches!(self, Error::InvalidPaginationValues { .. })
    }
}

/// Result type alias for pagify
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_values("One or more required pagination values are missing");
        assert_eq!(
            err.to_string(),
            "One or more required pagination values are missing"
        );

        let err = Error::config("take must be at least 1");
        assert_eq!(err.to_string(), "Configuration error: take must be at least 1");

        let err = Error::cursor_decode("not base64");
        assert_eq!(err.to_string(), "Invalid cursor token: not base64");
    }

    #[test]
    fn test_is_invalid_values() {
        assert!(Error::invalid_values("bad page").is_invalid_values());
        assert!(!Error::config("bad").is_invalid_values());
        assert!(!Error::cursor_decode("bad").is_invalid_values());
    }
}
