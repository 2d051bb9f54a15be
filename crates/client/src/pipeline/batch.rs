//! Bulk scraping with bounded concurrency.

use std::sync::Arc;

use pagelens_core::{ScrapeFailure, ScrapeResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{Pipeline, ScrapeOptions};

impl Pipeline {
    /// Scrape every URL, returning one result per input in input order.
    ///
    /// At most `max_concurrency` scrapes run at once (default: the pipeline's
    /// configured bound). One URL failing does not affect the others.
    pub async fn scrape_many<I, S>(&self, urls: I, max_concurrency: Option<usize>) -> Vec<ScrapeResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scrape_many_with(urls, max_concurrency, ScrapeOptions::default()).await
    }

    pub async fn scrape_many_with<I, S>(
        &self, urls: I, max_concurrency: Option<usize>, options: ScrapeOptions,
    ) -> Vec<ScrapeResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        let limit = max_concurrency.unwrap_or(self.max_concurrency()).max(1);
        let semaphore = Arc::new(Semaphore::new(limit));

        tracing::debug!(count = urls.len(), limit, "starting bulk scrape");

        let mut join_set = JoinSet::new();

        for (index, url) in urls.iter().cloned().enumerate() {
            let pipeline = self.clone();
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, pipeline.scrape_with(&url, options).await)
            });
        }

        let mut slots: Vec<Option<ScrapeResult>> = vec![None; urls.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::error!(error = %e, "scrape task did not complete"),
            }
        }

        let results: Vec<ScrapeResult> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    ScrapeResult::Failed(ScrapeFailure { url, error: "INTERNAL: scrape task did not complete".into() })
                })
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_error()).count();
        tracing::info!(total = results.len(), failed, "bulk scrape finished");

        results
    }
}
