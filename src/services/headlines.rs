// src/services/headlines.rs

//! Headline extraction from the advisory index page.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::Headline;
use crate::utils::{element_text, http::parse_document, normalize, parse_selector};

/// Date format used in index entry labels.
const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parses the index page into headlines.
pub struct HeadlineParser {
    container: Selector,
    entry: Selector,
    label: Selector,
    anchor: Selector,
}

impl HeadlineParser {
    /// Build the parser, compiling its selectors once.
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: parse_selector(".listbox")?,
            entry: parse_selector("dl")?,
            label: parse_selector("dt")?,
            anchor: parse_selector("a")?,
        })
    }

    /// Parse raw index page bytes.
    pub fn parse(&self, html: &[u8]) -> Result<Vec<Headline>> {
        let document = parse_document(html)?;
        Ok(self.parse_document(&document))
    }

    /// Extract headlines from an already-built document, in document order.
    ///
    /// Entries without a `date title` label, with an unparseable date, or
    /// without a link are skipped.
    pub fn parse_document(&self, document: &Html) -> Vec<Headline> {
        let mut headlines = Vec::new();
        for container in document.select(&self.container) {
            for entry in container.select(&self.entry) {
                match self.parse_entry(&entry) {
                    Some(headline) => headlines.push(headline),
                    None => log::debug!("Skipping malformed index entry"),
                }
            }
        }
        headlines
    }

    fn parse_entry(&self, entry: &ElementRef<'_>) -> Option<Headline> {
        let raw: String = entry.select(&self.label).map(|dt| element_text(&dt)).collect();
        let label = normalize(&raw);
        let tokens: Vec<&str> = label.split(' ').collect();
        let &[date, title] = tokens.as_slice() else {
            return None;
        };

        let published_at = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
        let link = entry.select(&self.anchor).next()?.value().attr("href")?;

        Some(Headline::new(published_at, title, link))
    }
}
