//! Client error types

use shared::error::{ApiErrorBody, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the backend
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the backend reported a missing member, article or sale
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api { code, .. } => ErrorCode::try_from(*code)
                .map(|c| c.is_not_found())
                .unwrap_or(false),
            _ => false,
        }
    }

    /// The typed error code, for `Api` errors with a known code
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }
}

impl From<ApiErrorBody> for ClientError {
    fn from(body: ApiErrorBody) -> Self {
        Self::Api {
            code: body.code,
            message: body.message,
            details: body.details,
        }
    }
}

impl From<shared::AppError> for ClientError {
    fn from(err: shared::AppError) -> Self {
        ApiErrorBody::from(&err).into()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
