// src/utils/http.rs

//! HTTP client and document helpers.

use std::time::Duration;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Build a document tree from raw response bytes.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. Fails only
/// when the body is empty or blank.
pub fn parse_document(bytes: &[u8]) -> Result<Html> {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        return Err(AppError::document("empty document"));
    }
    Ok(Html::parse_document(&text))
}
