//! Durable page records.
//!
//! One row per normalized URL. Writes are upserts, so a re-scrape refreshes
//! the row in place and keeps its original position in export order.

use super::connection::CacheDb;
use crate::Error;
use crate::model::{PageSignals, SET_SEPARATOR};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;
use tokio_rusqlite::rusqlite::types::Type;

/// Columns written by CSV export, in order.
pub const COLUMNS: [&str; 7] = ["url", "title", "summary", "email", "linkedin", "ai_insights", "scraped_at"];

const SELECT_PAGE: &str = "SELECT url, title, summary, email, linkedin, ai_insights, scraped_at, emails_json, social_json
                FROM cache";

/// A row of the durable `cache` table.
///
/// `email` and `linkedin` hold the comma-joined sets from `PageSignals`.
/// `emails` and `social_links` keep the same sets unjoined, since a link
/// may itself contain the separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedPage {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub email: String,
    pub linkedin: String,
    pub ai_insights: String,
    pub scraped_at: String,
    pub emails: Vec<String>,
    pub social_links: Vec<String>,
}

impl CachedPage {
    /// Flatten a signal record, stamping it with the current time.
    pub fn from_signals(page: &PageSignals) -> Self {
        Self {
            url: page.url.clone(),
            title: page.title.clone(),
            summary: page.summary.clone(),
            email: page.email_column(),
            linkedin: page.social_column(),
            ai_insights: page.insight.clone(),
            scraped_at: chrono::Utc::now().to_rfc3339(),
            emails: page.emails.clone(),
            social_links: page.social_links.clone(),
        }
    }

    /// Rebuild the signal record.
    ///
    /// Rows without stored sets fall back to splitting the joined columns.
    pub fn into_signals(self) -> PageSignals {
        let emails = if self.emails.is_empty() { split_column(&self.email) } else { self.emails };
        let social_links =
            if self.social_links.is_empty() { split_column(&self.linkedin) } else { self.social_links };

        PageSignals {
            url: self.url,
            title: self.title,
            summary: self.summary,
            emails,
            social_links,
            insight: self.ai_insights,
        }
    }
}

fn split_column(value: &str) -> Vec<String> {
    value.split(SET_SEPARATOR).map(str::to_string).collect()
}

fn json_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedPage> {
    Ok(CachedPage {
        url: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        email: row.get(3)?,
        linkedin: row.get(4)?,
        ai_insights: row.get(5)?,
        scraped_at: row.get(6)?,
        emails: json_column(row, 7)?,
        social_links: json_column(row, 8)?,
    })
}

impl CacheDb {
    /// Insert or replace the row for `page.url`.
    pub async fn upsert_page(&self, page: &CachedPage) -> Result<(), Error> {
        let page = page.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let emails_json = serde_json::to_string(&page.emails)?;
                let social_json = serde_json::to_string(&page.social_links)?;
                conn.execute(
                    "INSERT INTO cache (url, title, summary, email, linkedin, ai_insights, scraped_at, emails_json, social_json)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(url) DO UPDATE SET
                    title = excluded.title,
                    summary = excluded.summary,
                    email = excluded.email,
                    linkedin = excluded.linkedin,
                    ai_insights = excluded.ai_insights,
                    scraped_at = excluded.scraped_at,
                    emails_json = excluded.emails_json,
                    social_json = excluded.social_json",
                    params![
                        &page.url,
                        &page.title,
                        &page.summary,
                        &page.email,
                        &page.linkedin,
                        &page.ai_insights,
                        &page.scraped_at,
                        &emails_json,
                        &social_json,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get the row for a normalized URL.
    ///
    /// Returns None if the URL was never recorded.
    pub async fn get_page(&self, url: &str) -> Result<Option<CachedPage>, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CachedPage>, Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_PAGE} WHERE url = ?1"))?;

                match stmt.query_row(params![url], row_to_page) {
                    Ok(page) => Ok(Some(page)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Every row, in first-insertion order.
    pub async fn list_pages(&self) -> Result<Vec<CachedPage>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<CachedPage>, Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_PAGE} ORDER BY rowid"))?;
                let pages = stmt.query_map([], row_to_page)?.collect::<Result<Vec<_>, _>>()?;
                Ok(pages)
            })
            .await
            .map_err(Error::from)
    }

    pub async fn count_pages(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM cache", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
