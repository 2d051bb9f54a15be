//! pagelens server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use pagelens_client::Pipeline;
use pagelens_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let pipeline = Pipeline::from_config(&config).await?;

    tracing::info!("Starting pagelens server on stdio transport");

    let handler = handler::PageLensServer::new(pipeline.clone(), &config);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    let reason = server.waiting().await?;
    tracing::info!(?reason, "server stopped");

    if let Err(e) = pipeline.durable().clone().close().await {
        tracing::warn!(error = %e, "durable store did not close cleanly");
    }

    Ok(())
}
