//! cache_export tool implementation.
//!
//! Writes the durable table to a CSV file, one row per cached page.

use std::path::{Path, PathBuf};

use pagelens_core::{CacheDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_export tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheExportParams {
    /// Target file (default: the configured export path). Overwritten if present.
    #[serde(default)]
    pub path: Option<String>,
}

/// Output from the cache_export tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheExportOutput {
    pub path: String,
    /// Data rows written, excluding the header.
    pub rows: u64,
}

/// Implementation of the cache_export tool.
pub async fn export_impl(
    cache: &CacheDb, default_path: &Path, params: CacheExportParams,
) -> Result<CallToolResult, McpError> {
    let path = match params.path.as_deref().map(str::trim) {
        Some("") => return Err(Error::InvalidInput("path must not be empty".into()).into()),
        Some(p) => PathBuf::from(p),
        None => default_path.to_path_buf(),
    };

    let rows = cache.export_csv(&path).await?;

    let output = CacheExportOutput { path: path.display().to_string(), rows };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
