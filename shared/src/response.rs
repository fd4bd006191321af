//! API Response envelope
//!
//! Every successful call on the membership backend answers with:
//! ```json
//! { "code": 0, "message": "OK", "data": { ... } }
//! ```
//! Failed calls answer with an [`ApiErrorBody`](crate::error::ApiErrorBody)
//! and a non-2xx status.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 0 on success
    #[serde(default)]
    pub code: u16,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: "OK".to_string(),
            data: Some(data),
        }
    }

    /// Create a successful response without data
    pub fn empty() -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: "OK".to_string(),
            data: None,
        }
    }

    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }

    /// Unwrap the payload, turning a non-zero code or a missing payload into an error
    pub fn into_data(self) -> Result<T, AppError> {
        if !self.is_success() {
            let code = ErrorCode::try_from(self.code).unwrap_or(ErrorCode::Unknown);
            return Err(AppError::with_message(code, self.message));
        }
        self.data
            .ok_or_else(|| AppError::with_message(ErrorCode::InvalidFormat, "Missing response data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_success() {
        let resp: ApiResponse<i64> = serde_json::from_str(r#"{"code":0,"message":"OK","data":42}"#).unwrap();
        assert_eq!(resp.into_data().unwrap(), 42);
    }

    #[test]
    fn test_into_data_missing_payload() {
        let resp: ApiResponse<i64> = serde_json::from_str(r#"{"code":0,"message":"OK"}"#).unwrap();
        let err = resp.into_data().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_into_data_error_code() {
        let resp: ApiResponse<i64> =
            serde_json::from_str(r#"{"code":4001,"message":"Sale not found"}"#).unwrap();
        let err = resp.into_data().unwrap_err();
        assert_eq!(err.code, ErrorCode::SaleNotFound);
        assert_eq!(err.message, "Sale not found");
    }

    #[test]
    fn test_empty_skips_data() {
        let json = serde_json::to_string(&ApiResponse::<()>::empty()).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"OK"}"#);
    }
}
