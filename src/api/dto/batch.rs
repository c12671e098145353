//! DTOs for the batch shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{BatchItem, BatchResult};

/// One entry of `POST /api/shorten/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchRequestItem {
    pub correlation_id: String,
    pub original_url: String,
}

/// One entry of the batch response, in request order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchResponseItem {
    pub correlation_id: String,
    pub short_url: String,
}

impl From<BatchRequestItem> for BatchItem {
    fn from(item: BatchRequestItem) -> Self {
        BatchItem::new(item.correlation_id, item.original_url)
    }
}

impl From<BatchResult> for BatchResponseItem {
    fn from(result: BatchResult) -> Self {
        Self {
            correlation_id: result.correlation_id,
            short_url: result.short_url,
        }
    }
}
