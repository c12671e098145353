//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Record`] - A stored URL mapping with its owner and tombstone flag
//! - [`BatchItem`] / [`BatchResult`] - Correlation-tagged batch write input and output
//! - [`OwnedUrl`] - A live record as seen by its owner

pub mod record;

pub use record::{BatchItem, BatchResult, OwnedUrl, Record};
