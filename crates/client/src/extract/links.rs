//! Social platform link harvesting from HTML documents.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use pagelens_core::model::NO_SOCIAL_LINKS;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector"));

/// Hrefs of anchors that name a recognized platform.
///
/// `markers` must be lowercase; they are matched against the lowercased href.
/// Matching hrefs are kept verbatim (no resolution against the page URL)
/// and deduplicated in document order. Returns `[NO_SOCIAL_LINKS]` when none match.
pub fn social_links(document: &Html, markers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let lower = href.to_lowercase();
        if !markers.iter().any(|marker| lower.contains(marker.as_str())) {
            continue;
        }

        if seen.insert(href) {
            links.push(href.to_string());
        }
    }

    if links.is_empty() {
        links.push(NO_SOCIAL_LINKS.to_string());
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["linkedin.com".to_string(), "twitter.com".to_string()]
    }

    fn links(html: &str) -> Vec<String> {
        social_links(&Html::parse_document(html), &markers())
    }

    #[test]
    fn test_social_links_basic() {
        let html = r#"
            <html>
                <body>
                    <a href="https://www.linkedin.com/company/example">LinkedIn</a>
                    <a href="https://example.com/about">About</a>
                    <a href="https://twitter.com/example">Twitter</a>
                </body>
            </html>
        "#;

        assert_eq!(links(html), vec!["https://www.linkedin.com/company/example", "https://twitter.com/example"]);
    }

    #[test]
    fn test_social_links_case_insensitive_kept_verbatim() {
        let html = r#"<a href="HTTPS://LinkedIn.COM/in/Someone">me</a>"#;
        assert_eq!(links(html), vec!["HTTPS://LinkedIn.COM/in/Someone"]);
    }

    #[test]
    fn test_social_links_relative_not_resolved() {
        let html = r#"<a href="/redirect?to=twitter.com/example">t</a>"#;
        assert_eq!(links(html), vec!["/redirect?to=twitter.com/example"]);
    }

    #[test]
    fn test_social_links_duplicate() {
        let html = r#"
            <a href="https://twitter.com/example">First</a>
            <a href="https://twitter.com/example">Second</a>
        "#;
        assert_eq!(links(html), vec!["https://twitter.com/example"]);
    }

    #[test]
    fn test_social_links_ignore_anchor_without_href() {
        let html = r#"<a name="linkedin.com">anchor</a><a>twitter.com</a>"#;
        assert_eq!(links(html), vec![NO_SOCIAL_LINKS]);
    }

    #[test]
    fn test_social_links_none() {
        let html = r#"<p>No links here</p><a href="https://facebook.com/example">fb</a>"#;
        assert_eq!(links(html), vec![NO_SOCIAL_LINKS]);
    }
}
