//! Sale error types

use thiserror::Error;

use crate::ClientError;

/// Errors raised by basket edits, the sale lifecycle and statistics
///
/// `InvalidItem`, `NotReadyToFinalize` and `AlreadyFinalized` are raised
/// locally, before any call reaches the store.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Non-positive quantity, negative price or unusable free price
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Finalization requested while a member, payment or item is missing
    #[error("Sale is not ready to be finalized: missing {}", .0.join(", "))]
    NotReadyToFinalize(Vec<&'static str>),

    /// The sale is finalized and can no longer change
    #[error("Sale is already finalized")]
    AlreadyFinalized,

    /// A stored sale or statistics record could not be read
    #[error("Malformed sale data: {0}")]
    MalformedSale(String),

    /// Member, article or sale missing in the store
    #[error("Not found: {0}")]
    NotFound(#[source] ClientError),

    /// The backend call did not complete
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] ClientError),
}

impl From<ClientError> for SaleError {
    fn from(err: ClientError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err)
        } else {
            Self::TransportFailure(err)
        }
    }
}

/// Result type for sale operations
pub type SaleResult<T> = Result<T, SaleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_not_ready_message_lists_missing_parts() {
        let err = SaleError::NotReadyToFinalize(vec!["member", "items"]);
        assert_eq!(
            err.to_string(),
            "Sale is not ready to be finalized: missing member, items"
        );
    }

    #[test]
    fn test_client_error_mapping() {
        let not_found: SaleError = ClientError::NotFound("sale 9".into()).into();
        assert!(matches!(not_found, SaleError::NotFound(_)));

        let api_not_found: SaleError = ClientError::Api {
            code: 4001,
            message: "Sale not found".into(),
            details: None,
        }
        .into();
        match &api_not_found {
            SaleError::NotFound(source) => {
                assert_eq!(source.error_code(), Some(ErrorCode::SaleNotFound));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(std::error::Error::source(&api_not_found).is_some());

        let failure: SaleError = ClientError::Internal("db down".into()).into();
        assert!(matches!(failure, SaleError::TransportFailure(_)));
    }
}
