//! scrape tool implementation.
//!
//! Runs one URL through the pipeline. A failed scrape is still a successful
//! tool call: the `{url, error}` record is returned with `is_error` set.

use pagelens_client::{Pipeline, ScrapeOptions};
use pagelens_core::{Error, ScrapeResult};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the scrape tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeParams {
    /// The URL to scrape. A missing scheme defaults to https.
    pub url: String,

    /// Skip the cache lookup. The fresh result still replaces the cached one.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Implementation of the scrape tool.
pub async fn scrape_impl(pipeline: &Pipeline, params: ScrapeParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url must not be empty".into()).into());
    }

    let options = ScrapeOptions { force_refresh: params.force_refresh };
    let result = pipeline.scrape_with(&params.url, options).await;

    to_tool_result(&result)
}

pub(crate) fn to_tool_result(result: &ScrapeResult) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    if result.is_error() {
        Ok(CallToolResult::error(vec![Content::text(json)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}
