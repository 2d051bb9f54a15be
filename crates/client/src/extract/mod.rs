//! Signal extraction from fetched markup.
//!
//! Four independent rules run over one parsed document:
//! - title: first `<title>`, at most 200 characters
//! - summary: first three paragraphs with more than five words
//! - emails: `local@domain.tld`-shaped tokens in visible text
//! - social links: anchor hrefs naming a recognized platform
//!
//! No rule fails. A rule that finds nothing yields its sentinel, so every
//! field of a [`PageExtract`] is populated.
//!
//! The email rule is a pattern heuristic, not address validation: obfuscated
//! addresses are missed and strings like `pkg@1.2.3.tar` are accepted.

pub mod emails;
pub mod links;
pub mod text;

pub use emails::{extract_emails, find_emails, visible_text};
pub use links::social_links;
pub use text::{summary, title};

use pagelens_core::{AppConfig, PageSignals};
use scraper::Html;

/// Content fields extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtract {
    pub title: String,
    pub summary: String,
    pub emails: Vec<String>,
    pub social_links: Vec<String>,
}

impl PageExtract {
    /// Attach the enrichment output and the cache key.
    pub fn into_signals(self, url: impl Into<String>, insight: String) -> PageSignals {
        PageSignals {
            url: url.into(),
            title: self.title,
            summary: self.summary,
            emails: self.emails,
            social_links: self.social_links,
            insight,
        }
    }
}

/// Stable extractor trait for signal extraction.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> PageExtract;
}

/// Rule-based extractor over a scraper DOM.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    social_markers: Vec<String>,
}

impl SignalExtractor {
    pub fn new<I, S>(social_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { social_markers: social_markers.into_iter().map(|m| m.as_ref().to_lowercase()).collect() }
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new(AppConfig::default().social_markers)
    }
}

impl Extractor for SignalExtractor {
    fn extract(&self, html: &str) -> PageExtract {
        let document = Html::parse_document(html);

        PageExtract {
            title: title(&document),
            summary: summary(&document),
            emails: extract_emails(&document),
            social_links: social_links(&document, &self.social_markers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelens_core::model::{NO_EMAILS, NO_SOCIAL_LINKS, NO_SUMMARY, NO_TITLE};

    const COMPANY_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Acme Widgets</title>
            <script>var support = "bot@tracker.example";</script>
        </head>
        <body>
            <h1>Acme Widgets</h1>
            <p>We build durable widgets for industrial customers worldwide.</p>
            <p>Short blurb.</p>
            <p>Contact our team at sales@acme.example or support@acme.example today.</p>
            <footer>
                <a href="https://www.LinkedIn.com/company/acme">LinkedIn</a>
                <a href="https://twitter.com/acme">Twitter</a>
                <a href="/careers">Careers</a>
            </footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_extract_company_page() {
        let extract = SignalExtractor::default().extract(COMPANY_HTML);

        assert_eq!(extract.title, "Acme Widgets");
        assert_eq!(
            extract.summary,
            "We build durable widgets for industrial customers worldwide. \
             Contact our team at sales@acme.example or support@acme.example today."
        );
        assert_eq!(extract.emails, vec!["sales@acme.example", "support@acme.example"]);
        assert_eq!(
            extract.social_links,
            vec!["https://www.LinkedIn.com/company/acme", "https://twitter.com/acme"]
        );
    }

    #[test]
    fn test_extract_empty_document_uses_sentinels() {
        let extract = SignalExtractor::default().extract("");

        assert_eq!(extract.title, NO_TITLE);
        assert_eq!(extract.summary, NO_SUMMARY);
        assert_eq!(extract.emails, vec![NO_EMAILS]);
        assert_eq!(extract.social_links, vec![NO_SOCIAL_LINKS]);
    }

    #[test]
    fn test_extract_not_really_html() {
        let extract = SignalExtractor::default().extract("not really html <<< >>");
        assert_eq!(extract.title, NO_TITLE);
        assert_eq!(extract.emails, vec![NO_EMAILS]);
    }

    #[test]
    fn test_custom_social_markers() {
        let extractor = SignalExtractor::new(["GitHub.com"]);
        let extract = extractor.extract(r#"<a href="https://github.com/acme">code</a><a href="https://twitter.com/acme">t</a>"#);
        assert_eq!(extract.social_links, vec!["https://github.com/acme"]);
    }

    #[test]
    fn test_into_signals() {
        let signals = SignalExtractor::default()
            .extract(COMPANY_HTML)
            .into_signals("https://acme.example/", "Insight".to_string());
        assert_eq!(signals.url, "https://acme.example/");
        assert_eq!(signals.insight, "Insight");
        assert_eq!(signals.email_column(), "sales@acme.example, support@acme.example");
    }
}
