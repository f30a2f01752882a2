//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// New-vs-seen reconciliation settings
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Record file names inside the data directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// Console output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.crawler.endpoint).map_err(|e| {
            AppError::validation(format!(
                "crawler.endpoint '{}' is not a URL: {e}",
                self.crawler.endpoint
            ))
        })?;
        if self.crawler.list_path.trim().is_empty() {
            return Err(AppError::validation("crawler.list_path is empty"));
        }
        if self.reconcile.fetch_limit == 0 {
            return Err(AppError::validation("reconcile.fetch_limit must be > 0"));
        }
        if let Some(year) = self.reconcile.year_filter {
            if !(1000..=9999).contains(&year) {
                return Err(AppError::validation(format!(
                    "reconcile.year_filter {year} is not a four-digit year"
                )));
            }
        }
        if self.paths.headlines_file.trim().is_empty() || self.paths.details_file.trim().is_empty()
        {
            return Err(AppError::validation("paths entries must not be empty"));
        }
        if self.paths.headlines_file == self.paths.details_file {
            return Err(AppError::validation(
                "paths.headlines_file and paths.details_file must differ",
            ));
        }
        Ok(())
    }

    /// Absolute URL of the advisory index page.
    pub fn index_url(&self) -> Result<String> {
        crate::utils::resolve(&self.crawler.endpoint, &self.crawler.list_path)
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Site root every relative link is resolved against
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Path of the advisory index page, relative to the endpoint
    #[serde(default = "defaults::list_path")]
    pub list_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay after every request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            list_path: defaults::list_path(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Which new headlines are fetched in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Only fetch headlines published in this year; bypasses `fetch_limit`
    #[serde(default)]
    pub year_filter: Option<i32>,

    /// Maximum number of new details fetched per run
    #[serde(default = "defaults::fetch_limit")]
    pub fetch_limit: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            year_filter: None,
            fetch_limit: defaults::fetch_limit(),
        }
    }
}

/// Record file names, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::headlines_file")]
    pub headlines_file: String,

    #[serde(default = "defaults::details_file")]
    pub details_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            headlines_file: defaults::headlines_file(),
            details_file: defaults::details_file(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Draw a progress bar while fetching details
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn endpoint() -> String {
        "https://jvn.jp".into()
    }
    pub fn list_path() -> String {
        "report/all.html".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jvnlist/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Reconcile defaults
    pub fn fetch_limit() -> usize {
        50
    }

    // Path defaults
    pub fn headlines_file() -> String {
        "jvnlist.json".into()
    }
    pub fn details_file() -> String {
        "jvn_details.json".into()
    }

    pub fn show_progress() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_fetch_limit() {
        let mut config = Config::default();
        config.reconcile.fetch_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_year_and_endpoint() {
        let mut config = Config::default();
        config.reconcile.year_filter = Some(22);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.crawler.endpoint = "jvn.jp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [reconcile]
            year_filter = 2022

            [crawler]
            request_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.reconcile.year_filter, Some(2022));
        assert_eq!(config.reconcile.fetch_limit, 50);
        assert_eq!(config.crawler.request_delay_ms, 0);
        assert_eq!(config.crawler.timeout_secs, 10);
        assert_eq!(config.paths.details_file, "jvn_details.json");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = Config::load("no/such/dir/config.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn bundled_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../../data/config.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.reconcile.year_filter, None);
    }

    #[test]
    fn index_url_joins_endpoint_and_list_path() {
        assert_eq!(
            Config::default().index_url().unwrap(),
            "https://jvn.jp/report/all.html"
        );
    }
}
