// src/pipeline/scrape.rs

//! Full scraper pass: discovery plus detail extraction.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Config, ProductId, ProductRecord};
use crate::pipeline::discover::discover;
use crate::services::{ChromeSession, ProductFetcher};
use crate::utils::http::create_client;

/// Summary of a full pass.
///
/// Records are keyed by identifier: detail fetches run concurrently and
/// complete in arbitrary order, so aggregation must not depend on position.
#[derive(Debug, Serialize)]
pub struct ScrapeOutcome {
    pub records: BTreeMap<ProductId, ProductRecord>,
    /// Unique identifiers the discovery pass produced
    pub discovered: usize,
    /// Identifiers skipped over an HTTP or extraction failure
    pub skipped: usize,
    /// Submenus that contributed zero identifiers over a failure
    pub submenu_failures: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run one full pass: launch a rendering session, discover the identifier
/// set, then fetch every detail page over a bounded worker pool.
///
/// Only a discovery failure aborts the pass; per-product failures are
/// logged with the offending identifier and counted in `skipped`.
pub async fn run_scrape(config: &Config) -> Result<ScrapeOutcome> {
    let started_at = Utc::now();
    let client = create_client(&config.crawler)?;

    // Browser launch is blocking work. The session is scoped to this pass:
    // `discover` consumes it and the browser is gone before details fetch.
    let session = tokio::task::spawn_blocking(ChromeSession::launch)
        .await
        .map_err(|e| AppError::browser(format!("browser launch task failed: {e}")))??;

    let discovery = discover(config, &client, session).await?;

    let (records, skipped) = fetch_details(config, &client, &discovery.ids).await;

    Ok(ScrapeOutcome {
        discovered: discovery.ids.len(),
        skipped,
        submenu_failures: discovery.submenu_failures,
        records,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Fetch detail records for every identifier over a `max_concurrent` pool.
///
/// Fetches are independent and side-effect-free, so the pool changes no
/// observable output compared to a sequential walk.
async fn fetch_details(
    config: &Config,
    client: &Client,
    ids: &[ProductId],
) -> (BTreeMap<ProductId, ProductRecord>, usize) {
    let fetcher = ProductFetcher::new(client, &config.site);
    let concurrency = config.crawler.max_concurrent.max(1);
    let delay = Duration::from_millis(config.crawler.request_delay_ms);

    let mut records = BTreeMap::new();
    let mut skipped = 0;

    let mut details = stream::iter(ids)
        .map(|id| {
            let fetcher = &fetcher;
            async move { (id.clone(), fetcher.fetch(id).await) }
        })
        .buffer_unordered(concurrency);

    while let Some((id, result)) = details.next().await {
        match result {
            Ok(record) => {
                records.insert(id, record);
            }
            Err(error) => {
                skipped += 1;
                log::warn!("Skipping product {id}: {error}");
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    (records, skipped)
}
