//! Record entity representing a shortened URL mapping.

/// A stored URL mapping.
///
/// `key` is assigned by the store and never reused. Only `deleted` may change
/// after creation, and only from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: u64,
    pub original_url: String,
    /// Owning principal; empty for unowned records.
    pub owner_id: String,
    pub deleted: bool,
}

impl Record {
    /// Creates a live record.
    pub fn new(key: u64, original_url: String, owner_id: String) -> Self {
        Self {
            key,
            original_url,
            owner_id,
            deleted: false,
        }
    }

    /// Returns true if the record is visible to reads and listings.
    pub fn is_live(&self) -> bool {
        !self.deleted
    }

    /// Returns true if the record belongs to `owner`.
    ///
    /// An empty owner never owns anything, so unowned records cannot be
    /// listed or removed.
    pub fn is_owned_by(&self, owner: &str) -> bool {
        !owner.is_empty() && self.owner_id == owner
    }
}

/// One entry of a batch write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub correlation_id: String,
    pub original_url: String,
}

impl BatchItem {
    pub fn new(correlation_id: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            original_url: original_url.into(),
        }
    }
}

/// One entry of a batch write result, in the same position as its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub correlation_id: String,
    pub short_url: String,
}

/// A live record as returned by owner-scoped listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedUrl {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
}
