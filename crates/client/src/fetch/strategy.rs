//! Fetch strategy selection.
//!
//! A static table of URL substrings identifies sites that block plain HTTP
//! clients. Matching URLs are rendered in a headless browser; everything else
//! takes the lightweight path. Operators extend the table through
//! `browser_markers` in configuration.

use pagelens_core::ScrapeRequest;

/// Transport used to retrieve a page's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    Lightweight,
    Browser,
}

impl FetchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStrategy::Lightweight => "lightweight",
            FetchStrategy::Browser => "browser",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrategySelector {
    markers: Vec<String>,
}

impl StrategySelector {
    /// Markers are matched case-insensitively anywhere in the normalized URL.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { markers: markers.into_iter().map(|m| m.as_ref().to_lowercase()).collect() }
    }

    pub fn select(&self, request: &ScrapeRequest) -> FetchStrategy {
        let url = request.as_str().to_lowercase();
        if self.markers.iter().any(|marker| url.contains(marker.as_str())) {
            FetchStrategy::Browser
        } else {
            FetchStrategy::Lightweight
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}
