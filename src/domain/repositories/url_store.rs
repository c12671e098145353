//! Store trait for the URL shortening contract.

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl};
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// The shortening contract shared by every storage backend.
///
/// Short links returned by writes are full URLs (`<base_url>/<code>`);
/// reads and removals take the bare code.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryUrlStore`] - In-process table, lost on restart
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL `urls` table
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/store_memory.rs` and `tests/store_pg.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Short name of the backend, used in logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Shortens a single URL on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyInput`] or [`StoreError::InvalidUrl`] if
    /// the URL fails validation.
    ///
    /// Returns [`StoreError::Conflict`] carrying the existing short link if
    /// `owner` already has a live record for the same URL. No new record is
    /// created in that case.
    ///
    /// Returns [`StoreError::StorageUnavailable`] on backend failure.
    async fn write_url(&self, url: &str, owner: &str) -> Result<String, StoreError>;

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] if the code does not decode.
    /// Returns [`StoreError::NotFound`] if no live record has that key,
    /// including removed records.
    /// Returns [`StoreError::StorageUnavailable`] on backend failure.
    async fn read_url(&self, code: &str) -> Result<String, StoreError>;

    /// Shortens several URLs atomically.
    ///
    /// The result has one entry per input item, in input order. An item that
    /// conflicts with an existing live record gets that record's short link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBatchItem`] naming the first invalid
    /// entry; nothing from the batch is persisted in that case.
    /// Returns [`StoreError::StorageUnavailable`] on backend failure.
    async fn batch_write(
        &self,
        owner: &str,
        items: Vec<BatchItem>,
    ) -> Result<Vec<BatchResult>, StoreError>;

    /// Marks every live record of `owner` named in `codes` as removed.
    ///
    /// Codes that do not decode, belong to someone else, or are already
    /// removed are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] on backend failure only.
    async fn batch_remove(&self, owner: &str, codes: Vec<String>) -> Result<(), StoreError>;

    /// Lists every live record owned by `owner`, in backend order.
    ///
    /// An empty owner yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] on backend failure.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedUrl>, StoreError>;

    /// Verifies the backend is reachable without mutating state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the round-trip fails.
    async fn health_check(&self) -> Result<(), StoreError>;
}
