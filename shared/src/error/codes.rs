//! Error codes shared by the membership backend and its clients
//!
//! Codes are grouped by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Stock errors
//! - 4xxx: Sale errors
//! - 5xxx: Payment errors
//! - 6xxx: Article errors
//! - 7xxx: Export errors
//! - 8xxx: Member errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every failed API response
///
/// Codes travel as plain `u16` values so the browser front end and the
/// Rust client read the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Stock ====================
    /// Not enough units left to sell
    StockInsufficient = 3001,

    // ==================== 4xxx: Sale ====================
    /// Sale not found
    SaleNotFound = 4001,
    /// Sale is already finalized
    SaleAlreadyFinalized = 4002,
    /// Sale has no items
    SaleEmpty = 4003,
    /// Sale has no member attached
    SaleMemberRequired = 4004,
    /// Sale line has an invalid quantity or price
    SaleItemInvalid = 4005,

    // ==================== 5xxx: Payment ====================
    /// Invalid payment method
    PaymentInvalidMethod = 5001,

    // ==================== 6xxx: Article ====================
    /// Article not found
    ArticleNotFound = 6001,
    /// Article has an invalid price
    ArticleInvalidPrice = 6002,

    // ==================== 7xxx: Export ====================
    /// Export generation failed
    ExportFailed = 7001,
    /// Requested export format is not supported
    ExportFormatUnsupported = 7002,

    // ==================== 8xxx: Member ====================
    /// Member not found
    MemberNotFound = 8001,
    /// Membership (dues) record not found
    AdhesionNotFound = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Whether the code reports a missing resource of any kind
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::NotFound
                | ErrorCode::SaleNotFound
                | ErrorCode::ArticleNotFound
                | ErrorCode::MemberNotFound
                | ErrorCode::AdhesionNotFound
        )
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Stock
            ErrorCode::StockInsufficient => "Not enough stock for this article",

            // Sale
            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::SaleAlreadyFinalized => "Sale has already been finalized",
            ErrorCode::SaleEmpty => "Sale has no items",
            ErrorCode::SaleMemberRequired => "Sale requires a member",
            ErrorCode::SaleItemInvalid => "Sale line has an invalid quantity or price",

            // Payment
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Article
            ErrorCode::ArticleNotFound => "Article not found",
            ErrorCode::ArticleInvalidPrice => "Article has invalid price",

            // Export
            ErrorCode::ExportFailed => "Export generation failed",
            ErrorCode::ExportFormatUnsupported => "Export format is not supported",

            // Member
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::AdhesionNotFound => "Membership record not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a numeric value has no matching [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),

            2001 => Ok(ErrorCode::PermissionDenied),

            3001 => Ok(ErrorCode::StockInsufficient),

            4001 => Ok(ErrorCode::SaleNotFound),
            4002 => Ok(ErrorCode::SaleAlreadyFinalized),
            4003 => Ok(ErrorCode::SaleEmpty),
            4004 => Ok(ErrorCode::SaleMemberRequired),
            4005 => Ok(ErrorCode::SaleItemInvalid),

            5001 => Ok(ErrorCode::PaymentInvalidMethod),

            6001 => Ok(ErrorCode::ArticleNotFound),
            6002 => Ok(ErrorCode::ArticleInvalidPrice),

            7001 => Ok(ErrorCode::ExportFailed),
            7002 => Ok(ErrorCode::ExportFormatUnsupported),

            8001 => Ok(ErrorCode::MemberNotFound),
            8002 => Ok(ErrorCode::AdhesionNotFound),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
