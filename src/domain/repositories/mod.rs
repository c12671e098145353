//! Store trait definitions for the domain layer.
//!
//! [`UrlStore`] is the shortening contract. Implementations live in
//! `crate::infrastructure`, and a mock is generated via `mockall` for
//! handler tests.

pub mod url_store;

pub use url_store::UrlStore;

#[cfg(test)]
pub use url_store::MockUrlStore;
