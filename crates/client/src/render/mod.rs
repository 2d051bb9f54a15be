//! Headless browser rendering for pages that block plain HTTP clients.
//!
//! This module provides the renderer trait and, behind the `render` feature,
//! an implementation using chromiumoxide for headless Chrome/Chromium control.
//!
//! Rendering waits a fixed settle period after navigation before capturing
//! markup. Content that appears later than that is missed.

#[cfg(feature = "render")]
mod chromium;

#[cfg(feature = "render")]
pub use chromium::HeadlessRenderer;

use std::time::Duration;
use thiserror::Error;
use url::Url;

use pagelens_core::{AppConfig, Error};

/// Errors that can occur during page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Timeout waiting for page to load.
    #[error("render timeout after {0}ms")]
    Timeout(u64),
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::RenderFailed(err.to_string())
    }
}

/// Options for rendering a page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Wait after navigation before capturing markup (default: 5s).
    pub settle: Duration,

    /// Upper bound on navigation (default: 30s).
    pub timeout: Duration,

    /// User-Agent presented by the browser.
    pub user_agent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { settle: Duration::from_secs(5), timeout: Duration::from_secs(30), user_agent: "pagelens/0.1".into() }
    }
}

impl From<&AppConfig> for RenderOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            settle: config.render_settle(),
            timeout: config.render_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Result of rendering a page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Rendered HTML content.
    pub html: String,

    /// Final URL after redirects.
    pub final_url: Url,

    /// Time taken to render in milliseconds.
    pub render_time_ms: u64,
}

/// Renderer trait for headless browser page rendering.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render a URL to HTML via headless browser.
    async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_from_config() {
        let config = AppConfig { render_settle_ms: 1_500, user_agent: "ua/2".into(), ..Default::default() };
        let opts = RenderOptions::from(&config);
        assert_eq!(opts.settle, Duration::from_millis(1_500));
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.user_agent, "ua/2");
    }

    #[test]
    fn test_render_error_maps_to_render_failed() {
        let err: Error = RenderError::Timeout(30_000).into();
        assert!(matches!(err, Error::RenderFailed(_)));
        assert!(err.is_fetch_failure());
        assert_eq!(err.to_string(), "RENDER_FAILED: render timeout after 30000ms");
    }
}
