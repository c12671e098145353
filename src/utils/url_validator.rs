//! Structural validation of submitted URLs.
//!
//! A URL is accepted when it parses as an absolute URL with both a scheme
//! and a host. Any scheme is allowed; reachability is never checked.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("empty input")]
    Empty,

    #[error("invalid url {url:?}: {reason}")]
    Invalid { url: String, reason: String },
}

/// Checks that `input` is a well-formed absolute URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for an empty string.
/// Returns [`UrlValidationError::Invalid`] if parsing fails or the parsed
/// URL lacks a host (`mailto:`, `data:`, `file:///...`).
///
/// # Examples
///
/// ```
/// use shortener_store::utils::url_validator::validate_url;
///
/// assert!(validate_url("https://example.org").is_ok());
/// assert!(validate_url("ftp://files.example.org/a.txt").is_ok());
/// assert!(validate_url("example.org").is_err());
/// assert!(validate_url("").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let invalid = |reason: String| UrlValidationError::Invalid {
        url: input.to_string(),
        reason,
    };

    let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;

    if url.scheme().is_empty() {
        return Err(invalid("missing scheme".to_string()));
    }

    // The parser supplies `//` for special schemes, so `http:example.org`
    // would otherwise report a host the stored string does not have.
    let has_authority = input
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with("//"));
    if !has_authority {
        return Err(invalid("missing host".to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid("missing host".to_string())),
    }
}
