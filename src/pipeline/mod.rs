//! Pipeline entry points for harvester operations.
//!
//! - `run_crawler`: one incremental run (index → new details → store)
//! - `fetch_headlines`: index page only
//! - `reconcile`: new-vs-seen decisions and merging

pub mod crawl;
pub mod fetch;
pub mod reconcile;

pub use crawl::{CrawlOutcome, fetch_headlines, run_crawler};
pub use fetch::{FetchReport, HttpFetcher, PageFetcher, fetch_details};
pub use reconcile::{
    Budgeted, Worklist, apply_budget, compute_new, filter_year, merge_details, plan_worklist,
    recorded_keys,
};
