//! Error types for the roadmap service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for roadmap service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Roadmap service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or empty required input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Source document could not be read or parsed
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Generation backend reported a failure state
    #[error("Generation backend error: {0}")]
    GenerationBackend(String),

    /// Readiness polling exceeded the allowed attempts
    #[error("Generation backend not ready after {attempts} polls")]
    GenerationTimeout { attempts: u32 },

    /// Whole-ingestion deadline exceeded
    #[error("Ingestion exceeded the {seconds}s deadline")]
    DeadlineExceeded { seconds: u64 },

    /// Generation output does not conform to the roadmap schema
    #[error("Roadmap schema violation: {0}")]
    Schema(String),

    /// Lookup yielded no record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying store unavailable or write rejected
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a generation backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::GenerationBackend(message.into())
    }

    /// Create a schema validation error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg.clone()),
            Error::Extraction { filename, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "extraction_error",
                format!("Failed to extract text from '{}': {}", filename, message),
            ),
            Error::GenerationBackend(msg) => (
                StatusCode::BAD_GATEWAY,
                "generation_backend_error",
                msg.clone(),
            ),
            Error::GenerationTimeout { attempts } => (
                StatusCode::GATEWAY_TIMEOUT,
                "generation_timeout",
                format!("Generation backend not ready after {} polls", attempts),
            ),
            Error::DeadlineExceeded { seconds } => (
                StatusCode::GATEWAY_TIMEOUT,
                "deadline_exceeded",
                format!("Ingestion exceeded the {}s deadline", seconds),
            ),
            Error::Schema(msg) => (StatusCode::BAD_GATEWAY, "schema_error", msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Error::Storage(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_attempt_count() {
        let err = Error::GenerationTimeout { attempts: 30 };
        assert_eq!(
            err.to_string(),
            "Generation backend not ready after 30 polls"
        );
    }

    #[test]
    fn deadline_and_poll_timeouts_are_gateway_timeouts() {
        let response = Error::DeadlineExceeded { seconds: 600 }.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let response = Error::GenerationTimeout { attempts: 30 }.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn extraction_helper_carries_filename() {
        let err = Error::extraction("syllabus.pdf", "not a PDF");
        assert!(err.to_string().contains("syllabus.pdf"));
        assert!(err.to_string().contains("not a PDF"));
    }
}
