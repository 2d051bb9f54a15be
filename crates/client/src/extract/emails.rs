//! Email harvesting from visible page text.

use std::collections::HashSet;
use std::sync::LazyLock;

use pagelens_core::model::NO_EMAILS;
use regex::Regex;
use scraper::Html;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("invalid email pattern")
});

/// Elements whose text never renders.
const HIDDEN: [&str; 4] = ["script", "style", "noscript", "template"];

/// All text nodes outside [`HIDDEN`] elements, joined by single spaces.
pub fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .any(|ancestor| ancestor.value().as_element().is_some_and(|el| HIDDEN.contains(&el.name())));

        if !hidden {
            parts.push(&**text);
        }
    }

    parts.join(" ")
}

/// Email-shaped tokens in `text`, deduplicated in first-seen order.
pub fn find_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}

/// Emails in the document's visible text, or `[NO_EMAILS]`.
pub fn extract_emails(document: &Html) -> Vec<String> {
    let emails = find_emails(&visible_text(document));
    if emails.is_empty() { vec![NO_EMAILS.to_string()] } else { emails }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_emails_dedup_in_order() {
        let text = "Write to b@example.com, a@example.org or b@example.com again.";
        assert_eq!(find_emails(text), vec!["b@example.com", "a@example.org"]);
    }

    #[test]
    fn test_find_emails_shapes() {
        assert_eq!(find_emails("first.last+tag@mail.example.co.uk"), vec!["first.last+tag@mail.example.co.uk"]);
        assert_eq!(find_emails("mail info@example.com."), vec!["info@example.com"]);
        assert!(find_emails("user@localhost").is_empty());
        assert!(find_emails("pkg@1.2.3").is_empty());
        assert!(find_emails("name at example dot com").is_empty());
    }

    #[test]
    fn test_visible_text_skips_hidden_elements() {
        let document = Html::parse_document(
            r#"<html><head><style>.x { content: "css@style.example"; }</style></head>
            <body><p>Hello</p><script>track("js@script.example")</script>
            <noscript>ns@noscript.example</noscript><span>world</span></body></html>"#,
        );
        let text = visible_text(&document);
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
        assert!(!text.contains("@"));
    }

    #[test]
    fn test_adjacent_nodes_do_not_merge() {
        let document = Html::parse_document("<p>ops@example.com</p><p>Team</p>");
        assert_eq!(extract_emails(&document), vec!["ops@example.com"]);
    }

    #[test]
    fn test_extract_emails_sentinel() {
        let document = Html::parse_document("<p>No contact details here.</p>");
        assert_eq!(extract_emails(&document), vec![NO_EMAILS]);
    }
}
