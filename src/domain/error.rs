//! Error taxonomy of the shortening store.

use thiserror::Error;

use crate::utils::codec::CodecError;
use crate::utils::url_validator::UrlValidationError;

/// Errors returned by [`crate::domain::repositories::UrlStore`] operations.
///
/// `EmptyInput`, `InvalidUrl`, `InvalidIdentifier` and `InvalidBatchItem`
/// are caller mistakes (see [`StoreError::is_bad_input`]). `Conflict` is an
/// expected outcome, not a failure. `StorageUnavailable` is an
/// infrastructure fault whose message must not leak to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("empty input")]
    EmptyInput,

    #[error("bad input: {0}")]
    InvalidUrl(String),

    #[error("bad input: invalid id {code:?}: {reason}")]
    InvalidIdentifier { code: String, reason: String },

    #[error("bad input: batch item {index} (correlation id {correlation_id:?}): {source}")]
    InvalidBatchItem {
        index: usize,
        correlation_id: String,
        source: Box<StoreError>,
    },

    #[error("url already shortened: {short_url}")]
    Conflict { short_url: String },

    #[error("not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    /// Returns true for every input-validation kind.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::InvalidUrl(_)
                | Self::InvalidIdentifier { .. }
                | Self::InvalidBatchItem { .. }
        )
    }

    /// Builds an [`StoreError::InvalidIdentifier`] from a decode failure.
    pub fn invalid_identifier(code: &str, err: CodecError) -> Self {
        Self::InvalidIdentifier {
            code: code.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<UrlValidationError> for StoreError {
    fn from(e: UrlValidationError) -> Self {
        match e {
            UrlValidationError::Empty => Self::EmptyInput,
            other => Self::InvalidUrl(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}
