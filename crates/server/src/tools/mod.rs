//! MCP tool implementations.
//!
//! This module contains all tools exposed by the pagelens server.

pub mod cache;
pub mod scrape;
pub mod scrape_many;

pub use scrape::{ScrapeParams, scrape_impl};
pub use scrape_many::{ScrapeManyParams, scrape_many_impl};

#[cfg(test)]
pub(crate) mod test_support {
    use pagelens_client::Pipeline;
    use pagelens_core::AppConfig;
    use rmcp::model::CallToolResult;

    pub(crate) const PAGE_HTML: &str = r#"
        <html>
        <head><title>Acme Widgets</title></head>
        <body>
            <p>Acme Widgets builds sturdy widgets for small workshops.</p>
            <p>Write to sales@acme.test for bulk pricing.</p>
        </body>
        </html>
    "#;

    /// A pipeline over a temp database with rendering and insight disabled,
    /// plus a local HTTP server for lightweight fetches.
    pub(crate) struct Fixture {
        pub pipeline: Pipeline,
        pub server: mockito::ServerGuard,
        mocks: Vec<mockito::Mock>,
        _dir: tempfile::TempDir,
    }

    impl Fixture {
        /// Serve `PAGE_HTML` at `path`; returns the normalized URL.
        pub(crate) async fn serve_page(&mut self, path: &str) -> String {
            let mock = self
                .server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "text/html")
                .with_body(PAGE_HTML)
                .create_async()
                .await;
            self.mocks.push(mock);
            format!("{}{path}", self.server.url())
        }
    }

    pub(crate) async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("cache.sqlite"),
            render_enabled: false,
            gemini_api_key: None,
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(&config).await.unwrap();
        let server = mockito::Server::new_async().await;

        Fixture { pipeline, server, mocks: Vec::new(), _dir: dir }
    }

    pub(crate) fn text_of(result: &CallToolResult) -> String {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content")
            .to_string()
    }
}
