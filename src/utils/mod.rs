//! Utility functions and helpers.

pub mod http;
pub mod text;
pub mod url;

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

pub use self::text::normalize;
pub use self::url::{link_key, resolve};

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Concatenated text of an element and all of its descendants.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
