//! Data Transfer Objects for API requests and responses.
//!
//! Field names match the public JSON contract (`url`, `result`,
//! `correlation_id`, `original_url`, `short_url`).

pub mod batch;
pub mod health;
pub mod shorten;
pub mod user_urls;
