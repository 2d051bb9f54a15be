//! scrape_many tool implementation.
//!
//! Scrapes several URLs with bounded concurrency. Results come back in input
//! order and one URL failing never fails the batch.

use pagelens_client::{Pipeline, ScrapeOptions};
use pagelens_core::{Error, ScrapeResult};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest accepted batch.
const MAX_URLS: usize = 100;

/// Largest accepted worker bound.
const MAX_CONCURRENCY: usize = 32;

/// Input parameters for the scrape_many tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeManyParams {
    /// URLs to scrape (at most 100).
    pub urls: Vec<String>,

    /// Maximum number of concurrent scrapes (default: server setting, max: 32).
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Skip the cache lookup for every URL.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for the scrape_many tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeManyOutput {
    /// One result per input URL, in input order.
    pub results: Vec<ScrapeResult>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchSummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// Implementation of the scrape_many tool.
pub async fn scrape_many_impl(pipeline: &Pipeline, params: ScrapeManyParams) -> Result<CallToolResult, McpError> {
    if params.urls.is_empty() {
        return Err(Error::InvalidInput("urls array must not be empty".into()).into());
    }

    if params.urls.len() > MAX_URLS {
        return Err(Error::InvalidInput(format!("at most {MAX_URLS} urls per call")).into());
    }

    if let Some(n) = params.max_concurrency
        && !(1..=MAX_CONCURRENCY).contains(&n)
    {
        return Err(Error::InvalidInput(format!("max_concurrency must be between 1 and {MAX_CONCURRENCY}")).into());
    }

    let options = ScrapeOptions { force_refresh: params.force_refresh };
    let results = pipeline.scrape_many_with(params.urls, params.max_concurrency, options).await;

    let failed = results.iter().filter(|r| r.is_error()).count() as u32;
    let total = results.len() as u32;
    let output = ScrapeManyOutput { summary: BatchSummary { total, succeeded: total - failed, failed }, results };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
