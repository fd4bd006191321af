//! Error vocabulary shared by the membership backend and its clients
//!
//! - [`ErrorCode`]: numeric error codes, grouped by range
//! - [`AppError`]: error with code, message and details
//! - [`ApiErrorBody`]: JSON body of a failed API call
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::SaleNotFound).with_detail("id", 7);
//! assert!(err.code.is_not_found());
//! assert_eq!(err.code.code(), 4001);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiErrorBody, AppError, AppResult};
