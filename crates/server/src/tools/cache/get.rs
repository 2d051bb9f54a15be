//! cache_get tool implementation.
//!
//! Reads the durable row for a URL without fetching anything.

use pagelens_client::normalize;
use pagelens_core::{CacheDb, CachedPage, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The URL to look up. Normalized the same way scrape keys are.
    pub url: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The normalized lookup key.
    pub url: String,
    pub found: bool,
    pub page: Option<CachedPage>,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(cache: &CacheDb, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let request = normalize(&params.url).map_err(Error::from)?;
    let page = cache.get_page(request.as_str()).await?;

    let output = CacheGetOutput { url: request.as_str().to_string(), found: page.is_some(), page };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize page: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
