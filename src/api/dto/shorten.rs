//! DTOs for the single shortening endpoint.

use serde::{Deserialize, Serialize};

/// `POST /api/shorten` request body.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Short link for a created or already existing record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub result: String,
}
