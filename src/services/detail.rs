// src/services/detail.rs

//! Detail extraction from a single advisory page.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::Detail;
use crate::services::sections::{SectionField, SectionKind};
use crate::utils::text::non_empty_lines;
use crate::utils::{element_text, http::parse_document, normalize, parse_selector};

/// Separator between values collected from tables and score lines.
const JOIN_SEPARATOR: &str = " / ";

const PUBLISHED_MARKER: &str = "公開日";
const UPDATED_MARKER: &str = "最終更新日";
const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parses advisory pages into [`Detail`] records.
pub struct DetailParser {
    heading: Selector,
    date_bar: Selector,
    section: Selector,
    label: Selector,
    table_body: Selector,
    row: Selector,
    cell: Selector,
    score_line: Selector,
}

impl DetailParser {
    /// Build the parser, compiling its selectors once.
    pub fn new() -> Result<Self> {
        Ok(Self {
            heading: parse_selector("h1")?,
            date_bar: parse_selector("#head-bar-txt")?,
            section: parse_selector(".textbox")?,
            label: parse_selector("h2 img")?,
            table_body: parse_selector("tbody")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
            score_line: parse_selector(".cvss-line")?,
        })
    }

    /// Parse raw advisory page bytes.
    pub fn parse(&self, html: &[u8]) -> Result<Detail> {
        let document = parse_document(html)?;
        self.parse_document(&document)
    }

    /// Extract a detail from an already-built document.
    ///
    /// Only a missing code or title is an error; every section that is
    /// absent, unknown or unreadable leaves its field empty. `link` is left
    /// for the caller to fill.
    pub fn parse_document(&self, document: &Html) -> Result<Detail> {
        let (code, title) = self.parse_title(document)?;
        let (published_at, updated_at) = self.parse_dates(document);

        let mut detail = Detail {
            published_at,
            updated_at,
            code,
            title,
            ..Detail::default()
        };

        for section in document.select(&self.section) {
            let Some(label) = section
                .select(&self.label)
                .next()
                .and_then(|img| img.value().attr("alt"))
            else {
                continue;
            };
            let Some(field) = SectionField::from_label(label) else {
                log::debug!("Ignoring unknown section '{}'", label);
                continue;
            };

            let value = match field.kind() {
                SectionKind::Text => normalize(&element_text(&section)),
                SectionKind::VendorTable => self.parse_vendor(&section),
                SectionKind::ReferenceTable => self.parse_reference(&section),
                SectionKind::ScoreLines => self.parse_analysis(&section),
            };
            *field_mut(&mut detail, field) = value;
        }

        Ok(detail)
    }

    /// Code from the first heading line, title from the rest.
    fn parse_title(&self, document: &Html) -> Result<(String, String)> {
        let heading = document
            .select(&self.heading)
            .next()
            .ok_or_else(|| AppError::malformed("no heading block"))?;

        let lines = non_empty_lines(&element_text(&heading));
        match lines.split_first() {
            Some((code, rest)) if !rest.is_empty() => Ok((code.clone(), rest.join(" "))),
            _ => Err(AppError::malformed(format!(
                "heading has {} line(s), need code and title",
                lines.len()
            ))),
        }
    }

    fn parse_dates(&self, document: &Html) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let Some(bar) = document.select(&self.date_bar).next() else {
            return (None, None);
        };
        let text = normalize(&element_text(&bar));
        (
            date_after(&text, PUBLISHED_MARKER),
            date_after(&text, UPDATED_MARKER),
        )
    }

    /// First-column values of the first table body, header row skipped.
    fn parse_vendor(&self, section: &ElementRef<'_>) -> String {
        let Some(body) = section.select(&self.table_body).next() else {
            return String::new();
        };
        body.select(&self.row)
            .skip(1)
            .filter_map(|row| row.select(&self.cell).next())
            .map(|cell| element_text(&cell).trim().to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(JOIN_SEPARATOR)
    }

    /// Values of the cell after the first cell, for every row of the first table body.
    fn parse_reference(&self, section: &ElementRef<'_>) -> String {
        let Some(body) = section.select(&self.table_body).next() else {
            return String::new();
        };
        body.select(&self.row)
            .filter_map(|row| row.select(&self.cell).next())
            .filter_map(|first| first.next_siblings().find_map(ElementRef::wrap))
            .map(|cell| element_text(&cell).trim().to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(JOIN_SEPARATOR)
    }

    fn parse_analysis(&self, section: &ElementRef<'_>) -> String {
        let joined = section
            .select(&self.score_line)
            .map(|line| element_text(&line))
            .collect::<Vec<_>>()
            .join(JOIN_SEPARATOR);
        normalize(&joined)
    }
}

fn field_mut(detail: &mut Detail, field: SectionField) -> &mut String {
    match field {
        SectionField::Abstract => &mut detail.r#abstract,
        SectionField::Target => &mut detail.target,
        SectionField::Detail => &mut detail.detail,
        SectionField::Impact => &mut detail.impact,
        SectionField::Measure => &mut detail.measure,
        SectionField::Vendor => &mut detail.vendor,
        SectionField::Information => &mut detail.information,
        SectionField::Supplement => &mut detail.supplement,
        SectionField::Analysis => &mut detail.analysis,
        SectionField::Reference => &mut detail.reference,
    }
}

/// Parse the `YYYY/MM/DD` token following `marker` and an optional colon.
fn date_after(text: &str, marker: &str) -> Option<NaiveDate> {
    let start = text.find(marker)? + marker.len();
    let token = text[start..]
        .trim_start_matches([':', '：', ' '])
        .split(|c: char| c.is_whitespace() || c == '|' || c == '｜')
        .next()?;
    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Result<Detail> {
        DetailParser::new().unwrap().parse(html.as_bytes())
    }

    fn section(label: &str, body: &str) -> String {
        format!("<div class=\"textbox\">\n<h2><img alt=\"{label}\"></h2>\n{body}\n</div>\n")
    }

    fn page(sections: &[String]) -> String {
        format!(
            "<html><body>\n<h1>\nJVNVU#000000\nreport some problem\n</h1>\n{}</body></html>",
            sections.concat()
        )
    }

    #[test]
    fn test_title_and_abstract() {
        let html = page(&[section("概要", "<p>There are\nsome problems</p>")]);
        let detail = parse(&html).unwrap();
        assert_eq!(detail.code, "JVNVU#000000");
        assert_eq!(detail.title, "report some problem");
        assert_eq!(detail.r#abstract, "There are some problems");
        assert_eq!(detail.target, "");
        assert_eq!(detail.link, "");
    }

    #[test]
    fn test_multi_line_title_is_joined() {
        let html = "<h1>\n JVN#1 \n\n first part \n second\u{3000}part \n</h1>";
        let detail = parse(html).unwrap();
        assert_eq!(detail.code, "JVN#1");
        assert_eq!(detail.title, "first part second part");
    }

    #[test]
    fn test_heading_with_single_line_is_malformed() {
        let err = parse("<h1>\nJVNVU#000000\n</h1>").unwrap_err();
        assert!(matches!(err, AppError::MalformedDetail(_)));
    }

    #[test]
    fn test_missing_heading_is_malformed() {
        let err = parse("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, AppError::MalformedDetail(_)));
    }

    #[test]
    fn test_invalid_byte_in_ignored_section_keeps_the_page() {
        let mut html = page(&[
            section("概要", "<p>There are some problems</p>"),
            section("新しいセクション", "<p>BAD</p>"),
        ])
        .into_bytes();
        let at = html.windows(3).position(|w| w == b"BAD").unwrap();
        html[at] = 0xff;

        let detail = DetailParser::new().unwrap().parse(&html).unwrap();
        assert_eq!(detail.code, "JVNVU#000000");
        assert_eq!(detail.r#abstract, "There are some problems");
    }

    #[test]
    fn test_unknown_and_unlabelled_sections_are_ignored() {
        let html = page(&[
            section("新しいセクション", "<p>ignored</p>"),
            "<div class=\"textbox\"><h2>No image</h2><p>ignored too</p></div>".to_string(),
            section("対策方法", "<p>update</p>"),
        ]);
        let detail = parse(&html).unwrap();
        assert_eq!(detail.measure, "update");
        assert_eq!(detail.r#abstract, "");
    }

    #[test]
    fn test_vendor_skips_header_and_empty_rows() {
        let table = "<table><tbody>
<tr><th>ベンダ</th><th>ステータス</th></tr>
<tr><td> vendorA </td><td>該当製品あり</td></tr>
<tr><td>  </td><td>不明</td></tr>
<tr><td>vendorB</td><td>該当製品なし</td></tr>
</tbody></table>";
        let html = page(&[section("ベンダ情報", table)]);
        assert_eq!(parse(&html).unwrap().vendor, "vendorA / vendorB");
    }

    #[test]
    fn test_vendor_header_row_is_skipped_even_with_td() {
        let table = "<table><tbody>
<tr><td>header</td></tr>
<tr><td>vendorA</td></tr>
</tbody></table>";
        let html = page(&[section("ベンダ情報", table)]);
        assert_eq!(parse(&html).unwrap().vendor, "vendorA");
    }

    #[test]
    fn test_reference_reads_every_row() {
        let table = "<table><tbody>
<tr><td>[1]</td><td>CVE1</td></tr>
<tr><td>[2]</td><td> </td></tr>
<tr><td>[3]</td><td>CVE2</td></tr>
<tr><td>lonely</td></tr>
</tbody></table>";
        let html = page(&[section("関連文書", table)]);
        assert_eq!(parse(&html).unwrap().reference, "CVE1 / CVE2");
    }

    #[test]
    fn test_table_sections_without_table_stay_empty() {
        let html = page(&[
            section("ベンダ情報", "<p>no table</p>"),
            section("関連文書", "<p>no table</p>"),
        ]);
        let detail = parse(&html).unwrap();
        assert_eq!(detail.vendor, "");
        assert_eq!(detail.reference, "");
    }

    #[test]
    fn test_analysis_joins_score_lines() {
        let body = "<div class=\"cvss-line\">CVSS v3\nCVSS:3.0/AV:N\nbase: 5.3</div>
<p>not a score</p>
<div class=\"cvss-line\">CVSS v2  AV:N  base: 5.0</div>";
        let html = page(&[section("JPCERT/CCによる脆弱性分析結果", body)]);
        assert_eq!(
            parse(&html).unwrap().analysis,
            "CVSS v3 CVSS:3.0/AV:N base: 5.3 / CVSS v2 AV:N base: 5.0"
        );
    }

    #[test]
    fn test_dates_from_date_bar() {
        let html = format!(
            "<div id=\"head-bar-txt\">公開日：2022/01/14\u{3000}最終更新日：2022/02/03</div>{}",
            page(&[])
        );
        let detail = parse(&html).unwrap();
        assert_eq!(detail.published_at, NaiveDate::from_ymd_opt(2022, 1, 14));
        assert_eq!(detail.updated_at, NaiveDate::from_ymd_opt(2022, 2, 3));
    }

    #[test]
    fn test_missing_or_bad_date_bar_is_not_an_error() {
        let detail = parse(&page(&[])).unwrap();
        assert_eq!(detail.published_at, None);

        let html = format!("<div id=\"head-bar-txt\">公開日：soon</div>{}", page(&[]));
        let detail = parse(&html).unwrap();
        assert_eq!(detail.published_at, None);
        assert_eq!(detail.updated_at, None);
    }
}
