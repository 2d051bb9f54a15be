//! Two-tier cache coordination.
//!
//! Reads consult the ephemeral tier (and, when enabled, the durable tier).
//! Writes go to the ephemeral tier for every result and to the durable tier
//! for successful ones. Read failures degrade to a miss.

use std::sync::Arc;
use std::time::Duration;

use super::codec;
use super::connection::CacheDb;
use super::ephemeral::EphemeralStore;
use super::pages::CachedPage;
use crate::Error;
use crate::model::{ScrapeRequest, ScrapeResult};

#[derive(Clone)]
pub struct CacheManager {
    ephemeral: Arc<dyn EphemeralStore>,
    durable: CacheDb,
    ttl: Duration,
    serve_from_durable: bool,
}

impl CacheManager {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>, durable: CacheDb, ttl: Duration) -> Self {
        Self { ephemeral, durable, ttl, serve_from_durable: false }
    }

    /// Answer ephemeral misses from the durable table.
    pub fn with_durable_fallback(mut self, enabled: bool) -> Self {
        self.serve_from_durable = enabled;
        self
    }

    pub fn durable(&self) -> &CacheDb {
        &self.durable
    }

    /// Look up a previously stored result.
    ///
    /// Never fails: an unreachable store or an unreadable value is logged
    /// and reported as a miss.
    pub async fn lookup(&self, request: &ScrapeRequest) -> Option<ScrapeResult> {
        let key = request.as_str();

        match self.ephemeral.get(key).await {
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(result) => {
                    tracing::debug!(url = key, tier = "ephemeral", "cache hit");
                    return Some(result);
                }
                Err(e) => tracing::warn!(url = key, error = %e, "discarding unreadable ephemeral value"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(url = key, error = %e, "ephemeral lookup failed, treating as miss"),
        }

        if !self.serve_from_durable {
            return None;
        }

        match self.durable.get_page(key).await {
            Ok(Some(page)) => {
                tracing::debug!(url = key, tier = "durable", "cache hit");
                Some(ScrapeResult::Page(page.into_signals()))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(url = key, error = %e, "durable lookup failed, treating as miss");
                None
            }
        }
    }

    /// Record a terminal result.
    ///
    /// Ephemeral write problems are logged and swallowed. A durable write
    /// failure is returned so the caller can log it; the result itself is
    /// still valid.
    pub async fn store(&self, request: &ScrapeRequest, result: &ScrapeResult) -> Result<(), Error> {
        let key = request.as_str();

        match codec::encode(result) {
            Ok(bytes) => {
                if let Err(e) = self.ephemeral.set(key, bytes, self.ttl).await {
                    tracing::warn!(url = key, error = %e, "ephemeral write failed");
                }
            }
            Err(e) => tracing::warn!(url = key, error = %e, "could not encode result for ephemeral tier"),
        }

        if let ScrapeResult::Page(page) = result {
            self.durable.upsert_page(&CachedPage::from_signals(page)).await?;
        }

        Ok(())
    }
}
