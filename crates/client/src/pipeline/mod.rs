//! Scrape orchestration.
//!
//! Per request: normalize, check the cache, select a fetch strategy, fetch,
//! extract, enrich, store. Each stage runs at most once. Normalization and
//! fetch failures end the request with a `{url, error}` result; nothing
//! downstream of a successful fetch can turn the result into a failure.
//!
//! Failed results are returned but never cached, so a later request retries.

mod batch;

use std::sync::Arc;

use pagelens_core::{
    AppConfig, CacheDb, CacheManager, Error, MemoryStore, PageSignals, ScrapeRequest, ScrapeResult,
};

use crate::extract::{Extractor, SignalExtractor};
use crate::fetch::{FetchClient, FetchConfig, FetchStrategy, PageFetcher, StrategySelector, normalize};
use crate::insight::Enricher;
use crate::render::Renderer;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrapeOptions {
    /// Skip the cache lookup. The fresh result is still stored.
    pub force_refresh: bool,
}

/// Collaborators a [`Pipeline`] is built from.
pub struct PipelineParts {
    pub cache: CacheManager,
    pub selector: StrategySelector,
    pub fetcher: Arc<dyn PageFetcher>,
    /// `None` when browser rendering is unavailable; browser-routed requests then fail.
    pub renderer: Option<Arc<dyn Renderer>>,
    pub extractor: Arc<dyn Extractor>,
    pub enricher: Enricher,
    /// Default worker bound for [`Pipeline::scrape_many`].
    pub max_concurrency: usize,
}

/// The fetch-cache-extract-enrich pipeline. Clones share collaborators.
#[derive(Clone)]
pub struct Pipeline {
    parts: Arc<PipelineParts>,
}

impl Pipeline {
    pub fn new(parts: PipelineParts) -> Self {
        Self { parts: Arc::new(parts) }
    }

    /// Open the durable store and build every collaborator from configuration.
    pub async fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let durable = CacheDb::open(&config.db_path).await?;
        let ephemeral = Arc::new(MemoryStore::new(config.ephemeral_max_entries));
        let cache = CacheManager::new(ephemeral, durable, config.ephemeral_ttl())
            .with_durable_fallback(config.serve_from_durable);

        let fetcher = FetchClient::new(FetchConfig::from(config))?;

        tracing::info!(
            db_path = %config.db_path.display(),
            render = config.render_enabled,
            markers = config.browser_markers.len(),
            "pipeline ready"
        );

        Ok(Self::new(PipelineParts {
            cache,
            selector: StrategySelector::new(&config.browser_markers),
            fetcher: Arc::new(fetcher),
            renderer: renderer_from_config(config),
            extractor: Arc::new(SignalExtractor::new(&config.social_markers)),
            enricher: Enricher::from_config(config),
            max_concurrency: config.max_concurrency,
        }))
    }

    pub fn cache(&self) -> &CacheManager {
        &self.parts.cache
    }

    pub fn durable(&self) -> &CacheDb {
        self.parts.cache.durable()
    }

    pub fn max_concurrency(&self) -> usize {
        self.parts.max_concurrency
    }

    /// Scrape one URL. Never fails: errors come back as the `Failed` variant.
    pub async fn scrape(&self, input: &str) -> ScrapeResult {
        self.scrape_with(input, ScrapeOptions::default()).await
    }

    pub async fn scrape_with(&self, input: &str, options: ScrapeOptions) -> ScrapeResult {
        let request = match normalize(input) {
            Ok(request) => request,
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(input, error = %err, "rejected url");
                return ScrapeResult::failed(input.trim(), &err);
            }
        };

        if !options.force_refresh
            && let Some(hit) = self.parts.cache.lookup(&request).await
        {
            return hit;
        }

        let page = match self.fetch_and_enrich(&request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url = %request, error = %e, "scrape failed");
                return ScrapeResult::failed(request.as_str(), &e);
            }
        };

        let result = ScrapeResult::Page(page);

        if let Err(e) = self.parts.cache.store(&request, &result).await {
            tracing::error!(url = %request, error = %e, "durable write failed, result not persisted");
        }

        result
    }

    async fn fetch_and_enrich(&self, request: &ScrapeRequest) -> Result<PageSignals, Error> {
        let html = self.fetch(request).await?;
        let extract = self.parts.extractor.extract(&html);
        let insight = self.parts.enricher.enrich(&extract.summary).await;
        Ok(extract.into_signals(request.as_str(), insight))
    }

    async fn fetch(&self, request: &ScrapeRequest) -> Result<String, Error> {
        let strategy = self.parts.selector.select(request);
        tracing::debug!(url = %request, strategy = strategy.as_str(), "selected fetch strategy");

        match strategy {
            FetchStrategy::Lightweight => Ok(self.parts.fetcher.fetch(request.url()).await?.html),
            FetchStrategy::Browser => {
                let renderer = self.parts.renderer.as_ref().ok_or(Error::RenderDisabled)?;
                Ok(renderer.render(request.url()).await?.html)
            }
        }
    }
}

#[cfg(feature = "render")]
fn renderer_from_config(config: &AppConfig) -> Option<Arc<dyn Renderer>> {
    use crate::render::{HeadlessRenderer, RenderOptions};

    config
        .render_enabled
        .then(|| Arc::new(HeadlessRenderer::new(RenderOptions::from(config))) as Arc<dyn Renderer>)
}

#[cfg(not(feature = "render"))]
fn renderer_from_config(config: &AppConfig) -> Option<Arc<dyn Renderer>> {
    if config.render_enabled {
        tracing::warn!("built without the render feature, browser-routed urls will fail");
    }
    None
}
