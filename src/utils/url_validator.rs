//! Destination URL validation.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates a destination URL.
///
/// The URL is stored as given; validation only rejects input that cannot be
/// redirected to:
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https` (blocks `javascript:`, `data:`, ...)
/// 3. Must have a host
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first failed rule.
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
