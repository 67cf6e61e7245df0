//! Domain error types
//!
//! This module defines the error hierarchy for Abacus. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Abacus error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum AbacusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Workday API errors
    #[error("Workday error: {0}")]
    Workday(#[from] WorkdayError),

    /// XML document errors
    #[error("XML error: {0}")]
    Xml(String),

    /// Record mapping errors (missing required cross-reference, etc.)
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Workday-specific errors
///
/// Errors that occur when talking to the Workday tenant. These errors
/// don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum WorkdayError {
    /// Failed to reach the tenant at all
    #[error("Failed to connect to Workday tenant: {0}")]
    ConnectionFailed(String),

    /// Token acquisition or refresh failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body could not be understood
    #[error("Invalid response from tenant: {0}")]
    InvalidResponse(String),

    /// Server error (5xx) - transient, retried
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx and other non-success) - permanent
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// A single-record lookup returned zero or more than one record
    #[error("Cardinality violation: expected exactly one {kind} record, got {count}")]
    Cardinality { kind: &'static str, count: usize },
}

// Conversion from std::io::Error
impl From<std::io::Error> for AbacusError {
    fn from(err: std::io::Error) -> Self {
        AbacusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AbacusError {
    fn from(err: serde_json::Error) -> Self {
        AbacusError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AbacusError {
    fn from(err: toml::de::Error) -> Self {
        AbacusError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for AbacusError {
    fn from(err: csv::Error) -> Self {
        AbacusError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abacus_error_display() {
        let err = AbacusError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_workday_error_conversion() {
        let wd_err = WorkdayError::ConnectionFailed("Network error".to_string());
        let err: AbacusError = wd_err.into();
        assert!(matches!(err, AbacusError::Workday(_)));
    }

    #[test]
    fn test_server_error_display() {
        let err = WorkdayError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 503 - unavailable");
    }

    #[test]
    fn test_cardinality_display() {
        let err = WorkdayError::Cardinality {
            kind: "supplier",
            count: 2,
        };
        assert!(err.to_string().contains("exactly one supplier"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AbacusError = io_err.into();
        assert!(matches!(err, AbacusError::Io(_)));
    }

    #[test]
    fn test_abacus_error_implements_std_error() {
        let err = AbacusError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
