//! Scrape request and result types shared by the pipeline and both cache tiers.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// Title sentinel when the page has no `<title>`.
pub const NO_TITLE: &str = "No title";

/// Summary sentinel when no paragraph qualifies.
pub const NO_SUMMARY: &str = "No meaningful summary found";

/// Email sentinel when no email-shaped token is found.
pub const NO_EMAILS: &str = "No emails found";

/// Social link sentinel when no recognized platform link is found.
pub const NO_SOCIAL_LINKS: &str = "No social links found";

/// Insight sentinel when the text-analysis service fails or is not configured.
pub const INSIGHT_UNAVAILABLE: &str = "AI analysis unavailable";

/// Separator used when a set is flattened into a single durable column.
pub const SET_SEPARATOR: &str = ", ";

/// A normalized scrape target.
///
/// The wrapped URL is the cache key for both tiers, so a `ScrapeRequest`
/// can only be obtained from the normalizer (or from an already-parsed `Url`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrapeRequest {
    url: Url,
}

impl ScrapeRequest {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The cache key.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ScrapeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Signals extracted and enriched from one page.
///
/// Every field is always populated: empty extractions hold their sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageSignals {
    /// Normalized URL (cache key).
    pub url: String,
    /// Page title, at most 200 characters.
    pub title: String,
    /// First qualifying paragraphs joined by spaces.
    pub summary: String,
    /// Deduplicated email-shaped tokens, or `[NO_EMAILS]`.
    pub emails: Vec<String>,
    /// Links to recognized social platforms, or `[NO_SOCIAL_LINKS]`.
    pub social_links: Vec<String>,
    /// Text-analysis output, or `INSIGHT_UNAVAILABLE`.
    pub insight: String,
}

impl PageSignals {
    /// Emails flattened for the durable `email` column.
    pub fn email_column(&self) -> String {
        self.emails.join(SET_SEPARATOR)
    }

    /// Social links flattened for the durable `linkedin` column.
    pub fn social_column(&self) -> String {
        self.social_links.join(SET_SEPARATOR)
    }
}

/// A scrape that terminated in the failed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of one scrape.
///
/// Serializes as either the full signal record or `{url, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ScrapeResult {
    Page(PageSignals),
    Failed(ScrapeFailure),
}

impl ScrapeResult {
    /// Build the error variant from a terminal pipeline error.
    pub fn failed(url: impl Into<String>, err: &Error) -> Self {
        ScrapeResult::Failed(ScrapeFailure { url: url.into(), error: err.to_string() })
    }

    pub fn url(&self) -> &str {
        match self {
            ScrapeResult::Page(page) => &page.url,
            ScrapeResult::Failed(failure) => &failure.url,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScrapeResult::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScrapeResult::Failed(failure) => Some(&failure.error),
            ScrapeResult::Page(_) => None,
        }
    }

    pub fn page(&self) -> Option<&PageSignals> {
        match self {
            ScrapeResult::Page(page) => Some(page),
            ScrapeResult::Failed(_) => None,
        }
    }
}
