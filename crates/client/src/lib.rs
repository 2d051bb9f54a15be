//! Client code for pagelens.
//!
//! This crate provides URL normalization, fetch-strategy selection, the
//! lightweight and browser fetchers, signal extraction, insight enrichment,
//! and the pipeline that composes them.

pub mod extract;
pub mod fetch;
pub mod insight;
pub mod pipeline;
pub mod render;

pub use extract::{Extractor, PageExtract, SignalExtractor};
pub use fetch::{FetchClient, FetchConfig, FetchStrategy, FetchedPage, PageFetcher, StrategySelector, normalize};
pub use insight::{Enricher, GeminiClient, GeminiConfig, InsightError, InsightService};
pub use pipeline::{Pipeline, PipelineParts, ScrapeOptions};
pub use render::{RenderError, RenderOptions, RenderedPage, Renderer};

#[cfg(feature = "render")]
pub use render::HeadlessRenderer;
