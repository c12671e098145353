//! Infrastructure layer for storage backends.
//!
//! This layer implements the [`crate::domain::repositories::UrlStore`]
//! contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Volatile in-process store for development and tests
//! - [`persistence`] - PostgreSQL store

pub mod memory;
pub mod persistence;
