//! Pure helpers shared by both store backends.
//!
//! - [`codec`] - Radix codec between record keys and short codes
//! - [`url_validator`] - Structural URL validation

pub mod codec;
pub mod url_validator;
