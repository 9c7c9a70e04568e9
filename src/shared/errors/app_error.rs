use serde::Serialize;
use specta::Type;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Type)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the TMDB api_key
        let err = err.without_url();
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                401 | 403 => {
                    AppError::Unauthorized("Not authorized to access external service".to_string())
                }
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

impl AppError {
    /// Whether an automatic retry has a chance of succeeding
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ExternalServiceError(_)
                | AppError::RateLimitError(_)
                | AppError::ApiError(_)
                | AppError::InternalError(_)
        )
    }

    /// Short text suitable for a toast in the UI
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "The requested movie could not be found.",
            AppError::RateLimitError(_) => "Too many requests. Please wait a moment and try again.",
            AppError::Unauthorized(_) | AppError::ConfigurationError(_) => {
                "The movie service is not configured correctly."
            }
            AppError::InvalidInput(_) | AppError::ValidationError(_) => {
                "Please check your input and try again."
            }
            AppError::StorageError(_) => "Your local data could not be saved.",
            _ => "Failed to load movies. Please try again later.",
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
