//! HTTP middleware for request processing.
//!
//! Provides owner identification and observability middleware.

pub mod auth;
pub mod tracing;
