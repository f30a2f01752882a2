// src/models/mod.rs

//! Domain models for the harvester.
//!
//! Headlines come from the advisory index page, details from individual
//! advisory pages; configuration drives how a run picks its work.

mod config;
mod detail;
mod headline;

// Re-export all public types
pub use config::{Config, CrawlerConfig, LoggingConfig, PathsConfig, ReconcileConfig};
pub use detail::Detail;
pub use headline::Headline;
