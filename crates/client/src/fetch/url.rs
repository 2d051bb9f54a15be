//! URL normalization so every spelling of a page shares one cache key.

use pagelens_core::{Error, ScrapeRequest};

/// Error type for URL normalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for Error {
    fn from(err: UrlError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

/// Normalize a raw URL string into a scrape request.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Prefix `https://` if no scheme is given
/// 3. Lowercase the host (done by the parser for special schemes)
/// 4. Remove fragment (#...)
/// 5. Keep path and query string intact
pub fn normalize(input: &str) -> Result<ScrapeRequest, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if has_scheme(trimmed) { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&with_scheme).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::InvalidUrl(format!("missing host in {trimmed}")));
    }

    parsed.set_fragment(None);

    Ok(ScrapeRequest::new(parsed))
}

/// True for `scheme://...` and for the opaque schemes users paste by mistake.
/// `host:port` input has no scheme.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return input.starts_with("file:") || input.starts_with("mailto:") || input.starts_with("javascript:");
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let req = normalize("https://example.com").unwrap();
        assert_eq!(req.as_str(), "https://example.com/");
    }

    #[test]
    fn test_normalize_default_scheme() {
        let req = normalize("example.com").unwrap();
        assert_eq!(req.url().scheme(), "https");
        assert_eq!(req, normalize("https://example.com").unwrap());
    }

    #[test]
    fn test_normalize_keeps_http() {
        let req = normalize("http://example.com/page").unwrap();
        assert_eq!(req.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_normalize_lowercase_host() {
        let req = normalize("https://EXAMPLE.COM/About").unwrap();
        assert_eq!(req.as_str(), "https://example.com/About");
    }

    #[test]
    fn test_normalize_remove_fragment_keep_query() {
        let req = normalize("https://example.com/path?query=value&b=2#fragment").unwrap();
        assert_eq!(req.url().path(), "/path");
        assert_eq!(req.url().query(), Some("query=value&b=2"));
        assert_eq!(req.url().fragment(), None);
    }

    #[test]
    fn test_normalize_trim_whitespace() {
        let req = normalize("  example.com/contact \n").unwrap();
        assert_eq!(req.as_str(), "https://example.com/contact");
    }

    #[test]
    fn test_normalize_host_with_port() {
        let req = normalize("localhost:8080/status").unwrap();
        assert_eq!(req.as_str(), "https://localhost:8080/status");
    }

    #[test]
    fn test_normalize_unsupported_scheme() {
        assert!(matches!(normalize("ftp://example.com"), Err(UrlError::UnsupportedScheme(_))));
        assert!(matches!(normalize("file:///etc/passwd"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(matches!(normalize(""), Err(UrlError::Empty)));
        assert!(matches!(normalize("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_normalize_malformed() {
        assert!(matches!(normalize("exa mple.com"), Err(UrlError::InvalidUrl(_))));
        assert!(matches!(normalize("https://"), Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_error_maps_to_invalid_url() {
        let err: Error = UrlError::Empty.into();
        assert!(err.to_string().starts_with("INVALID_URL"));
    }
}
