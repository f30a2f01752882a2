//! New-vs-seen reconciliation.
//!
//! Decides which freshly scraped headlines still need their detail page
//! fetched, bounds that work per run, and merges fetched details into the
//! stored set without duplicating a link.

use std::collections::HashSet;

use chrono::Datelike;

use crate::models::{Detail, Headline, ReconcileConfig};

/// Result of applying the fetch budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budgeted {
    pub headlines: Vec<Headline>,
    /// Original length when the list was cut down to the limit
    pub truncated_from: Option<usize>,
}

impl Budgeted {
    pub fn is_truncated(&self) -> bool {
        self.truncated_from.is_some()
    }
}

/// The detail pages one run will fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worklist {
    pub headlines: Vec<Headline>,
    /// Headlines not yet in the store, before any filter or budget
    pub new_count: usize,
    /// Set when the fetch budget cut the list
    pub truncated_from: Option<usize>,
}

/// Key set of already stored details.
pub fn recorded_keys(details: &[Detail]) -> HashSet<String> {
    details.iter().map(Detail::key).collect()
}

/// Headlines whose link is not yet recorded, in their original order.
pub fn compute_new(fetched: &[Headline], recorded: &HashSet<String>) -> Vec<Headline> {
    fetched
        .iter()
        .filter(|h| !recorded.contains(&h.key()))
        .cloned()
        .collect()
}

/// Keep at most `limit` headlines, first ones first.
pub fn apply_budget(headlines: Vec<Headline>, limit: usize) -> Budgeted {
    if headlines.len() > limit {
        let original = headlines.len();
        let mut headlines = headlines;
        headlines.truncate(limit);
        Budgeted {
            headlines,
            truncated_from: Some(original),
        }
    } else {
        Budgeted {
            headlines,
            truncated_from: None,
        }
    }
}

/// Headlines published in `year`, in their original order.
pub fn filter_year(headlines: Vec<Headline>, year: i32) -> Vec<Headline> {
    headlines
        .into_iter()
        .filter(|h| h.published_at.year() == year)
        .collect()
}

/// Pick the run's work from freshly scraped headlines.
///
/// With a year filter every new headline of that year is fetched and the
/// budget does not apply; otherwise the new headlines are cut to
/// `fetch_limit`.
pub fn plan_worklist(
    fetched: &[Headline],
    recorded: &HashSet<String>,
    config: &ReconcileConfig,
) -> Worklist {
    let new = compute_new(fetched, recorded);
    let new_count = new.len();

    match config.year_filter {
        Some(year) => Worklist {
            headlines: filter_year(new, year),
            new_count,
            truncated_from: None,
        },
        None => {
            let budgeted = apply_budget(new, config.fetch_limit);
            Worklist {
                headlines: budgeted.headlines,
                new_count,
                truncated_from: budgeted.truncated_from,
            }
        }
    }
}

/// Append fresh details whose link is not already present.
///
/// Existing order is kept and fresh entries follow in fetch order; the
/// result never holds two details with the same key.
pub fn merge_details(existing: Vec<Detail>, fresh: Vec<Detail>) -> Vec<Detail> {
    let mut seen = recorded_keys(&existing);
    let mut merged = existing;
    for detail in fresh {
        if seen.insert(detail.key()) {
            merged.push(detail);
        } else {
            log::debug!("Skipping duplicate detail {}", detail.link);
        }
    }
    merged
}
