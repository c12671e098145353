//! DTOs for owner-scoped listing.

use serde::{Deserialize, Serialize};

use crate::domain::entities::OwnedUrl;

/// A live link owned by the caller.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUrl {
    pub short_url: String,
    pub original_url: String,
}

impl From<OwnedUrl> for UserUrl {
    fn from(owned: OwnedUrl) -> Self {
        Self {
            short_url: owned.short_url,
            original_url: owned.original_url,
        }
    }
}
