// src/utils/url.rs

//! Link resolution and identity keys.

use url::Url;

/// Resolve a site-relative link against the site endpoint.
///
/// # Examples
/// ```
/// use jvnlist::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://jvn.jp", "/vu/JVNVU90000000/index.html").unwrap(),
///     "https://jvn.jp/vu/JVNVU90000000/index.html"
/// );
/// ```
pub fn resolve(endpoint: &str, href: &str) -> crate::error::Result<String> {
    let base = Url::parse(endpoint)?;
    Ok(base.join(href)?.to_string())
}

/// Comparable identity key for a headline or detail link.
///
/// Relative and absolute forms of the same page map to the same key: the
/// path only, with query and fragment stripped, dot segments resolved and
/// any trailing slash removed.
pub fn link_key(link: &str) -> String {
    let trimmed = link.trim();
    let parsed = Url::parse(trimmed).or_else(|_| {
        Url::parse("http://localhost/").and_then(|base| base.join(trimmed))
    });

    match parsed {
        Ok(url) => clean_path(url.path()),
        Err(_) => clean_path(trimmed),
    }
}

fn clean_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://jvn.jp", "vu/JVNVU1/index.html").unwrap(),
            "https://jvn.jp/vu/JVNVU1/index.html"
        );
        assert_eq!(
            resolve("https://jvn.jp/report/all.html", "/jp/JVN1/index.html").unwrap(),
            "https://jvn.jp/jp/JVN1/index.html"
        );
        assert!(resolve("not a url", "/x").is_err());
    }

    #[test]
    fn test_link_key_relative_and_absolute_agree() {
        assert_eq!(
            link_key("/vu/JVNVU1/index.html"),
            link_key("https://jvn.jp/vu/JVNVU1/index.html")
        );
        assert_eq!(link_key("vu/JVNVU1/index.html"), "/vu/JVNVU1/index.html");
    }

    #[test]
    fn test_link_key_strips_query_fragment_and_dots() {
        assert_eq!(link_key("/vu/./JVNVU1/index.html?x=1#top"), "/vu/JVNVU1/index.html");
        assert_eq!(link_key("/vu/tmp/../JVNVU1/"), "/vu/JVNVU1");
        assert_eq!(link_key("https://jvn.jp/"), "/");
    }
}
