//! Shared types for the membership point of sale
//!
//! Wire models, money formatting, error codes and the response envelope
//! used by the backend and by `membership-client`.

pub mod error;
pub mod models;
pub mod money;
pub mod response;
pub mod util;

// Re-exports
pub use error::{ApiErrorBody, AppError, AppResult, ErrorCode};
pub use models::{
    Article, ExportFile, Member, PaymentType, SaleLinePayload, SalePayload, SaleSummary,
    StatisticsResponse,
};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
