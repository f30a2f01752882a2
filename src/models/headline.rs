//! Headline data structure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::link_key;

/// A summary row scraped from the advisory index page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Headline {
    /// Publish date shown next to the title
    pub published_at: NaiveDate,

    /// Advisory title
    pub title: String,

    /// Site-relative link to the advisory page
    pub link: String,
}

impl Headline {
    pub fn new(published_at: NaiveDate, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            published_at,
            title: title.into(),
            link: link.into(),
        }
    }

    /// Identity key used to compare against stored details.
    pub fn key(&self) -> String {
        link_key(&self.link)
    }
}
