// src/utils/text.rs

//! Whitespace normalization shared by every extractor.

/// Characters folded into a plain space before collapsing.
const SPACE_LIKE: [char; 4] = ['\n', '\r', '\t', '\u{3000}'];

/// Collapse whitespace variants into single spaces and trim.
///
/// Newlines, carriage returns, tabs and the ideographic space (U+3000)
/// become a plain space, runs of spaces collapse into one, and
/// leading/trailing whitespace is removed.
///
/// # Examples
/// ```
/// use jvnlist::utils::text::normalize;
///
/// assert_eq!(normalize(" There are\nsome\u{3000}\u{3000}problems "), "There are some problems");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if SPACE_LIKE.contains(&c) { ' ' } else { c };
        if c == ' ' && (out.is_empty() || out.ends_with(' ')) {
            continue;
        }
        out.push(c);
    }
    out.trim().to_string()
}

/// Normalize every line of `raw` and drop the ones left empty.
pub fn non_empty_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect()
}
