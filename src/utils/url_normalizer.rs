//! Long URL acceptance checks and redirect target normalization.
//!
//! Validation runs when a link is created; normalization runs only when it is
//! resolved, so the stored value is always the caller's raw input.

use url::Url;

/// Errors that can occur while accepting a long URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must not contain whitespace or control characters")]
    ForbiddenCharacters,
}

/// Checks that `input` is an absolute HTTP(S) URL.
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`,
/// `file:`, and relative input such as `example.com/path`.
///
/// The raw input is what gets stored and later redirected to, so it must
/// parse as-is: any whitespace or control character is refused rather than
/// silently stripped by the parser.
///
/// # Errors
///
/// Returns [`UrlValidationError::ForbiddenCharacters`] for whitespace or control characters.
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlValidationError::ForbiddenCharacters);
    }

    let url = Url::parse(input)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}

/// Turns a stored long URL into the redirect target.
///
/// Values without an `http://` or `https://` prefix (in any letter case) get
/// `https://` prepended; everything else is returned untouched.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(redirect_target("example.com/path"), "https://example.com/path");
/// assert_eq!(redirect_target("http://example.com"), "http://example.com");
/// ```
pub fn redirect_target(long_url: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|prefix| {
        long_url
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    });

    if has_scheme {
        long_url.to_string()
    } else {
        format!("https://{long_url}")
    }
}
