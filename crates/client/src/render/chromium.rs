//! Chromium-backed renderer.
//!
//! Each call launches its own browser process and tears it down before
//! returning, whether navigation succeeded or not.

use std::time::Instant;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use url::Url;

use super::{RenderError, RenderOptions, RenderedPage, Renderer};

/// Headless Chrome/Chromium renderer using chromiumoxide.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    options: RenderOptions,
}

impl HeadlessRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    async fn launch(&self) -> Result<(Browser, tokio::task::JoinHandle<()>), RenderError> {
        let config = BrowserConfig::builder()
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--user-agent={}", self.options.user_agent))
            .build()
            .map_err(RenderError::BrowserLaunch)?;

        let (browser, mut handler) =
            Browser::launch(config).await.map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        Ok((browser, events))
    }

    async fn capture(&self, browser: &Browser, url: &Url) -> Result<RenderedPage, RenderError> {
        let start = Instant::now();
        let timeout_ms = self.options.timeout.as_millis() as u64;

        let page = tokio::time::timeout(self.options.timeout, browser.new_page(url.as_str()))
            .await
            .map_err(|_| RenderError::Timeout(timeout_ms))?
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        tokio::time::sleep(self.options.settle).await;

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .and_then(|u| Url::parse(&u).ok())
            .unwrap_or_else(|| url.clone());

        if let Err(e) = page.close().await {
            tracing::debug!("page close failed: {e}");
        }

        Ok(RenderedPage { html, final_url, render_time_ms: start.elapsed().as_millis() as u64 })
    }
}

#[async_trait::async_trait]
impl Renderer for HeadlessRenderer {
    async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError> {
        let (mut browser, events) = self.launch().await?;

        let outcome = self.capture(&browser, url).await;

        if let Err(e) = browser.close().await {
            tracing::debug!("browser close failed: {e}");
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!("browser wait failed: {e}");
        }
        events.abort();

        match &outcome {
            Ok(page) => tracing::debug!(url = %url, render_ms = page.render_time_ms, "rendered page"),
            Err(e) => tracing::warn!(url = %url, error = %e, "render failed"),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    #[ignore = "requires network and Chrome/Chromium"]
    async fn test_render_simple_page() {
        let renderer = HeadlessRenderer::new(RenderOptions { settle: Duration::from_millis(500), ..Default::default() });
        let url = Url::parse("https://example.com").unwrap();

        let page = renderer.render(&url).await.unwrap();
        assert!(page.html.contains("Example Domain"));
        assert_eq!(page.final_url.as_str(), "https://example.com/");
    }

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium"]
    async fn test_render_unreachable_host_cleans_up() {
        let renderer = HeadlessRenderer::new(RenderOptions {
            settle: Duration::from_millis(100),
            timeout: Duration::from_secs(10),
            ..Default::default()
        });
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let first = renderer.render(&url).await;
        assert!(matches!(first, Err(RenderError::Navigation(_) | RenderError::Timeout(_))));

        let second = renderer.render(&url).await;
        assert!(matches!(second, Err(RenderError::Navigation(_) | RenderError::Timeout(_))));
    }
}
