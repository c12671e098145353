//! PostgreSQL store implementation.
//!
//! Queries are built at runtime with SQLx bind parameters; the schema lives
//! in `migrations/` and is applied by the server on startup.
//!
//! # Stores
//!
//! - [`PgUrlStore`] - Persistent record store over the `urls` table

pub mod pg_url_store;

pub use pg_url_store::{PgUrlStore, UrlCounts};
