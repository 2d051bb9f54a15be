//! Page retrieval.
//!
//! ### URL Normalization
//! - Trim whitespace, ensure scheme (default: `https`)
//! - Lowercase host, remove fragments
//! - Preserve path and query string
//!
//! ### Strategy
//! - URLs matching a browser marker are rendered headlessly
//! - Everything else is a single GET via [`FetchClient`]
//!
//! ### Lightweight Fetch
//! - One attempt, no retry, no fallback to the browser
//! - Fixed timeout (default 10s)
//! - Max body bytes: 5MB (configurable)

pub mod strategy;
pub mod url;

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use std::time::{Duration, Instant};

pub use strategy::{FetchStrategy, StrategySelector};
pub use self::url::{UrlError, normalize};

use pagelens_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "pagelens/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 10s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "pagelens/0.1".to_string(), max_bytes: 5 * 1024 * 1024, timeout: Duration::from_millis(10_000) }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// Markup retrieved by either fetch strategy.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// Response body decoded as text
    pub html: String,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Lightweight page retrieval.
///
/// Implementations make a single attempt and report failures with the
/// fetch error family (`FETCH_TIMEOUT`, `FETCH_TOO_LARGE`, `HTTP_ERROR`).
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, Error>;
}

/// Plain HTTP GET client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn classify(&self, err: reqwest::Error, context: &str) -> Error {
        if err.is_timeout() {
            Error::FetchTimeout(format!("no response within {}ms", self.config.timeout.as_millis()))
        } else {
            Error::HttpError(format!("{context}: {err}"))
        }
    }

    fn too_large(&self, len: usize) -> Error {
        Error::FetchTooLarge(format!("{len} bytes exceeds {}", self.config.max_bytes))
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, Error> {
        let start = Instant::now();

        let mut response = self
            .http
            .get(url.clone())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.classify(e, "network error"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status_label(status))));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(self.too_large(len as usize));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.classify(e, "failed to read response"))?
        {
            body.extend_from_slice(&chunk);
            if body.len() > self.config.max_bytes {
                return Err(self.too_large(body.len()));
            }
        }

        let html = decode_body(content_type.as_deref(), &body);
        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(url = %url, final_url = %final_url, fetch_ms, bytes = body.len(), "fetched page");

        Ok(FetchedPage { url: url.clone(), final_url, html, fetch_ms })
    }
}

/// Decode a response body with the charset named in `Content-Type`, defaulting to UTF-8.
///
/// A byte-order mark overrides the declared charset.
fn decode_body(content_type: Option<&str>, body: &[u8]) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

fn status_label(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
