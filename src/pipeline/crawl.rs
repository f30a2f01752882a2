// src/pipeline/crawl.rs

//! Incremental advisory crawl.

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::models::{Config, Headline};
use crate::pipeline::fetch::{PageFetcher, fetch_details};
use crate::pipeline::reconcile::{merge_details, plan_worklist, recorded_keys};
use crate::services::{DetailParser, HeadlineParser};
use crate::storage::RecordStorage;

/// Summary of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Headlines found on the index page
    pub headline_count: usize,
    /// Headlines whose details were not stored yet
    pub new_count: usize,
    /// Length of the worklist before the fetch budget cut it
    pub truncated_from: Option<usize>,
    /// Detail pages requested
    pub attempted: usize,
    pub detail_failures: usize,
    /// Details appended to the store
    pub appended: usize,
    /// Details in the store after the run
    pub stored_total: usize,
}

/// Fetch and parse the advisory index page.
///
/// Any failure here is fatal for the run.
pub async fn fetch_headlines(config: &Config, fetcher: &dyn PageFetcher) -> Result<Vec<Headline>> {
    let index_url = config.index_url()?;
    log::info!("Fetching advisory index {}", index_url);
    let page = fetcher.fetch(&index_url).await?;
    HeadlineParser::new()?.parse(&page)
}

/// Run one incremental crawl.
///
/// The index snapshot is always replaced; details are fetched only for
/// headlines not yet stored and appended to the stored set.
pub async fn run_crawler(
    config: &Config,
    storage: &dyn RecordStorage,
    fetcher: &dyn PageFetcher,
) -> Result<CrawlOutcome> {
    let start_time = Utc::now();

    let headlines = fetch_headlines(config, fetcher).await?;
    log::info!("Index lists {} advisories", headlines.len());

    let existing = storage.load_details().await?;
    storage.save_headlines(&headlines).await?;

    let recorded = recorded_keys(&existing);
    let worklist = plan_worklist(&headlines, &recorded, &config.reconcile);

    log::info!("{} updates found", worklist.new_count);
    if let Some(year) = config.reconcile.year_filter {
        log::info!(
            "{} of them published in {}",
            worklist.headlines.len(),
            year
        );
    }
    if let Some(original) = worklist.truncated_from {
        log::warn!(
            "Truncated to the first {} of {} updates; run again or set a year filter to fetch the rest",
            worklist.headlines.len(),
            original
        );
    }

    let progress = progress_bar(config.logging.show_progress, worklist.headlines.len());
    let parser = DetailParser::new()?;
    let report = fetch_details(
        fetcher,
        &parser,
        &config.crawler.endpoint,
        &worklist.headlines,
        &progress,
    )
    .await;
    progress.finish_and_clear();

    let before = existing.len();
    let merged = merge_details(existing, report.details);
    let appended = merged.len() - before;
    if appended > 0 {
        storage.save_details(&merged).await?;
    }

    let outcome = CrawlOutcome {
        start_time,
        end_time: Utc::now(),
        headline_count: headlines.len(),
        new_count: worklist.new_count,
        truncated_from: worklist.truncated_from,
        attempted: worklist.headlines.len(),
        detail_failures: report.failures,
        appended,
        stored_total: merged.len(),
    };

    log::info!(
        "Fetched {} of {} details ({} failed), {} appended, {} stored",
        outcome.attempted - outcome.detail_failures,
        outcome.attempted,
        outcome.detail_failures,
        outcome.appended,
        outcome.stored_total
    );

    Ok(outcome)
}

fn progress_bar(enabled: bool, len: usize) -> ProgressBar {
    if !enabled || len == 0 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
