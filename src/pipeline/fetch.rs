// src/pipeline/fetch.rs

//! Page fetching with a fixed delay and one request in flight.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, Detail, Headline};
use crate::services::DetailParser;
use crate::utils::{http::create_async_client, resolve};

/// Source of raw page bytes.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP fetcher that waits a fixed delay after every request.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the configured timeout, user agent and delay.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let result = self.get(url).await;

        // The delay applies to failed requests as well.
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}

/// Details fetched for a worklist.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Successfully parsed details, in worklist order
    pub details: Vec<Detail>,
    pub failures: usize,
}

/// Fetch and parse the detail page of every headline, one at a time.
///
/// A page that fails to download or parse is logged and skipped; the rest
/// of the worklist still runs. Each returned detail carries its absolute
/// link.
pub async fn fetch_details(
    fetcher: &dyn PageFetcher,
    parser: &DetailParser,
    endpoint: &str,
    worklist: &[Headline],
    progress: &ProgressBar,
) -> FetchReport {
    let mut report = FetchReport::default();

    let mut results = stream::iter(worklist)
        .map(|headline| async move {
            let url = resolve(endpoint, &headline.link)?;
            let page = fetcher.fetch(&url).await?;
            let mut detail = parser.parse(&page)?;
            detail.link = url;
            Ok::<Detail, AppError>(detail)
        })
        .buffered(1)
        .zip(stream::iter(worklist));

    while let Some((result, headline)) = results.next().await {
        progress.inc(1);
        match result {
            Ok(detail) => report.details.push(detail),
            Err(error) => {
                report.failures += 1;
                log::warn!("Failed to fetch detail {}: {}", headline.link, error);
            }
        }
    }

    report
}
