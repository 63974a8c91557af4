//! Error handling module
//!
//! Provides unified error types for the indicator stage, the runner and the CLI edge.
//! The scenario engine itself never fails: its edge cases are data defaults.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let (message, details) = match err {
            AppError::Io(e) => {
                error!("I/O error: {:?}", e);
                ("Failed to read or write a file".to_string(), Some(e.to_string()))
            }
            AppError::Serialization(e) => {
                error!("Serialization error: {:?}", e);
                ("Malformed JSON input".to_string(), Some(e.to_string()))
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ("An internal error occurred".to_string(), Some(msg.clone()))
            }
            AppError::Config(msg) => {
                error!("Configuration error: {}", msg);
                ("A configuration error occurred".to_string(), Some(msg.clone()))
            }
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Timeout(msg) => (msg.clone(), None),
        };

        ErrorResponse {
            success: false,
            message,
            error: details,
            code: Some(err.code().to_string()),
        }
    }
}

/// Result type alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Helper function to create a not found error
pub fn not_found_error(msg: impl Into<String>) -> AppError {
    AppError::NotFound(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(not_found_error("city 'atlantis'").code(), "NOT_FOUND");
        assert_eq!(AppError::Validation("bad area".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::Timeout("compare".into()).code(), "TIMEOUT");
    }

    #[test]
    fn test_error_response_hides_internal_details_in_message() {
        let err = AppError::Internal("worker panicked".to_string());
        let response = ErrorResponse::from(&err);

        assert!(!response.success);
        assert_eq!(response.message, "An internal error occurred");
        assert_eq!(response.error.as_deref(), Some("worker panicked"));
        assert_eq!(response.code.as_deref(), Some("INTERNAL_ERROR"));
    }

    #[test]
    fn test_error_response_passes_user_facing_messages_through() {
        let err = not_found_error("City 'atlantis' not found");
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(json["message"], "City 'atlantis' not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("error").is_none());
    }
}
