//! Title and summary rules.

use std::sync::LazyLock;

use pagelens_core::model::{NO_SUMMARY, NO_TITLE};
use scraper::{Html, Selector};

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// A paragraph qualifies for the summary with more than this many words.
pub const MIN_SUMMARY_WORDS: usize = 5;

/// Number of qualifying paragraphs joined into the summary.
pub const SUMMARY_PARAGRAPHS: usize = 3;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("invalid selector"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("invalid selector"));

/// Text of the first `<title>`, truncated to [`MAX_TITLE_CHARS`].
pub fn title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>())
        .map(|text| text.trim().chars().take(MAX_TITLE_CHARS).collect::<String>())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// First paragraphs with more than [`MIN_SUMMARY_WORDS`] words, in document order.
pub fn summary(document: &Html) -> String {
    let blocks: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|text| text.split_whitespace().count() > MIN_SUMMARY_WORDS)
        .take(SUMMARY_PARAGRAPHS)
        .collect();

    if blocks.is_empty() { NO_SUMMARY.to_string() } else { blocks.join(" ") }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_title_trimmed() {
        assert_eq!(title(&doc("<title>\n  Hello World  \n</title>")), "Hello World");
    }

    #[test]
    fn test_title_first_wins() {
        assert_eq!(title(&doc("<title>One</title><svg><title>Two</title></svg>")), "One");
    }

    #[test]
    fn test_title_truncated_by_chars() {
        let long = "é".repeat(250);
        let result = title(&doc(&format!("<title>{long}</title>")));
        assert_eq!(result.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_title_missing_or_blank() {
        assert_eq!(title(&doc("<p>No head here</p>")), NO_TITLE);
        assert_eq!(title(&doc("<title>   </title>")), NO_TITLE);
    }

    #[test]
    fn test_summary_skips_short_paragraphs() {
        let html = "<p>one two three four five</p><p>one two three four five six</p>";
        assert_eq!(summary(&doc(html)), "one two three four five six");
    }

    #[test]
    fn test_summary_takes_first_three() {
        let html = (1..=5)
            .map(|i| format!("<p>Paragraph number {i} has enough words here.</p>"))
            .collect::<String>();
        assert_eq!(
            summary(&doc(&html)),
            "Paragraph number 1 has enough words here. \
             Paragraph number 2 has enough words here. \
             Paragraph number 3 has enough words here."
        );
    }

    #[test]
    fn test_summary_collapses_whitespace_and_inline_markup() {
        let html = "<p>This   paragraph\n spans <b>several</b> lines and <a href='#'>links</a>.</p>";
        assert_eq!(summary(&doc(html)), "This paragraph spans several lines and links.");
    }

    #[test]
    fn test_summary_sentinel_without_paragraphs() {
        assert_eq!(summary(&doc("<div>Plenty of words in a div but no paragraph at all</div>")), NO_SUMMARY);
    }
}
