//! CSV export of the durable table.

use std::io::Write;
use std::path::Path;

use super::connection::CacheDb;
use super::pages::{COLUMNS, CachedPage};
use crate::Error;

/// Write a header row followed by one row per page; returns the row count.
pub fn write_csv<W: Write>(writer: W, pages: &[CachedPage]) -> Result<u64, Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(COLUMNS)?;

    for page in pages {
        out.write_record([
            page.url.as_str(),
            page.title.as_str(),
            page.summary.as_str(),
            page.email.as_str(),
            page.linkedin.as_str(),
            page.ai_insights.as_str(),
            page.scraped_at.as_str(),
        ])?;
    }

    out.flush().map_err(|e| Error::Export(e.to_string()))?;
    Ok(pages.len() as u64)
}

impl CacheDb {
    /// Export every durable row to `path`, in first-insertion order.
    ///
    /// The file is overwritten. Returns the number of data rows written.
    pub async fn export_csv(&self, path: impl AsRef<Path>) -> Result<u64, Error> {
        let pages = self.list_pages().await?;
        let path = path.as_ref().to_path_buf();

        let rows = tokio::task::spawn_blocking(move || {
            let file = std::fs::File::create(&path)
                .map_err(|e| Error::Export(format!("{}: {e}", path.display())))?;
            write_csv(file, &pages)
        })
        .await
        .map_err(|e| Error::Export(e.to_string()))??;

        tracing::info!(rows, "exported durable cache to csv");
        Ok(rows)
    }
}
