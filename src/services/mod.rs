//! Service layer for the harvester.
//!
//! This module contains the page extractors:
//! - Index page parsing (`HeadlineParser`)
//! - Advisory page parsing (`DetailParser`)
//! - Section label dispatch (`SectionField`)

mod detail;
mod headlines;
mod sections;

pub use detail::DetailParser;
pub use headlines::HeadlineParser;
pub use sections::{SECTION_LABELS, SectionField, SectionKind};
