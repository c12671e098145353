//! Domain layer containing the shortening contract and its data model.
//!
//! # Architecture
//!
//! - [`entities`] - Records and batch item types
//! - [`error`] - [`error::StoreError`] taxonomy shared by every backend
//! - [`links`] - Short link rendering from keys (codec + base URL)
//! - [`repositories`] - The [`repositories::UrlStore`] trait
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the HTTP layer
//! - Backends in [`crate::infrastructure`] implement [`repositories::UrlStore`]
//!   and are selected once at startup by configuration
//!
//! # Request Flow
//!
//! 1. Handler receives an owner (from the cookie middleware) and input
//! 2. The store validates URLs via [`crate::utils::url_validator`]
//! 3. Keys are allocated by the backend and rendered by [`links::LinkBuilder`]
//! 4. Results or a typed [`error::StoreError`] flow back to the handler

pub mod entities;
pub mod error;
pub mod links;
pub mod repositories;
