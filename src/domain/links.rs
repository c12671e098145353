//! Rendering of record keys as public short links.

use crate::domain::error::StoreError;
use crate::domain::entities::BatchItem;
use crate::utils::codec::Codec;
use crate::utils::url_validator::validate_url;

/// Store-level settings shared by every record: the codec and the public
/// base URL that prefixes each short link.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
    codec: Codec,
}

impl LinkBuilder {
    /// Creates a builder. A trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, codec: Codec) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, codec }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Encodes a key as its short code.
    pub fn code(&self, key: u64) -> String {
        self.codec.encode(key)
    }

    /// Renders the full short link `<base_url>/<code>` for a key.
    pub fn short_url(&self, key: u64) -> String {
        format!("{}/{}", self.base_url, self.code(key))
    }

    /// Decodes a short code back to its key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] if the code is not valid in
    /// the configured radix.
    pub fn key(&self, code: &str) -> Result<u64, StoreError> {
        self.codec
            .decode(code)
            .map_err(|e| StoreError::invalid_identifier(code, e))
    }
}

/// Validates every URL of a batch before anything is written.
///
/// # Errors
///
/// Returns [`StoreError::InvalidBatchItem`] for the first invalid entry.
pub fn validate_batch(items: &[BatchItem]) -> Result<(), StoreError> {
    for (index, item) in items.iter().enumerate() {
        validate_url(&item.original_url).map_err(|e| StoreError::InvalidBatchItem {
            index,
            correlation_id: item.correlation_id.clone(),
            source: Box::new(e.into()),
        })?;
    }
    Ok(())
}
