//! Detail data structure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::link_key;

/// A structured advisory scraped from one advisory page.
///
/// `code` and `title` are always present. Every other text field is empty
/// when the page has no matching section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Detail {
    /// Publish date from the page's date bar, if it had one
    #[serde(default)]
    pub published_at: Option<NaiveDate>,

    /// Last update date from the page's date bar, if it had one
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,

    /// Absolute URL of the advisory page
    #[serde(default)]
    pub link: String,

    /// Advisory identifier, e.g. `JVNVU#12345678`
    pub code: String,

    pub title: String,

    #[serde(default)]
    pub r#abstract: String,

    /// Affected systems
    #[serde(default)]
    pub target: String,

    #[serde(default)]
    pub detail: String,

    #[serde(default)]
    pub impact: String,

    /// Countermeasures
    #[serde(default)]
    pub measure: String,

    /// Vendor names joined with `" / "`
    #[serde(default)]
    pub vendor: String,

    #[serde(default)]
    pub information: String,

    #[serde(default)]
    pub supplement: String,

    /// CVSS score lines joined with `" / "`
    #[serde(default)]
    pub analysis: String,

    /// Related documents joined with `" / "`
    #[serde(default)]
    pub reference: String,
}

impl Detail {
    /// Identity key used for deduplication in the store.
    pub fn key(&self) -> String {
        link_key(&self.link)
    }
}
