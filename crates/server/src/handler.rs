//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::path::PathBuf;

use crate::tools::cache::{CacheExportParams, CacheGetParams, export_impl, get_impl};
use crate::tools::{ScrapeManyParams, ScrapeParams, scrape_impl, scrape_many_impl};

use pagelens_client::Pipeline;
use pagelens_core::AppConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for pagelens.
#[derive(Clone)]
pub struct PageLensServer {
    tool_router: ToolRouter<Self>,
    pipeline: Pipeline,
    export_path: PathBuf,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PageLensServer {
    /// Create a new server handler over a ready pipeline.
    pub fn new(pipeline: Pipeline, config: &AppConfig) -> Self {
        Self { tool_router: Self::tool_router(), pipeline, export_path: config.export_path.clone() }
    }

    /// Scrape a single URL.
    ///
    /// Served from the cache when fresh; otherwise fetched, extracted, enriched, and stored.
    #[tool(
        description = "Scrape a URL. Returns title, summary, emails, social links, and an AI insight, or {url, error} on failure."
    )]
    async fn scrape(&self, params: Parameters<ScrapeParams>) -> Result<CallToolResult, McpError> {
        scrape_impl(&self.pipeline, params.0).await
    }

    #[tool(
        description = "Scrape several URLs with bounded concurrency. Results are returned in input order with a summary."
    )]
    async fn scrape_many(&self, params: Parameters<ScrapeManyParams>) -> Result<CallToolResult, McpError> {
        scrape_many_impl(&self.pipeline, params.0).await
    }

    #[tool(description = "Read the stored row for a URL from the durable cache without fetching.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(self.pipeline.durable(), params.0).await
    }

    #[tool(description = "Export every cached page to a CSV file. Returns the path and row count.")]
    async fn cache_export(&self, params: Parameters<CacheExportParams>) -> Result<CallToolResult, McpError> {
        export_impl(self.pipeline.durable(), &self.export_path, params.0).await
    }
}

impl ServerHandler for PageLensServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "pagelens".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::fixture;

    #[tokio::test]
    async fn test_router_lists_every_tool() {
        let fx = fixture().await;
        let server = PageLensServer::new(fx.pipeline.clone(), &AppConfig::default());

        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["cache_export", "cache_get", "scrape", "scrape_many"]);
    }

    #[tokio::test]
    async fn test_server_info() {
        let fx = fixture().await;
        let info = PageLensServer::new(fx.pipeline.clone(), &AppConfig::default()).get_info();
        assert_eq!(info.server_info.name, "pagelens");
        assert!(info.capabilities.tools.is_some());
    }
}
