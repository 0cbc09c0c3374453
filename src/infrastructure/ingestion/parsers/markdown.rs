//! Markdown page extraction

use pulldown_cmark::{Event, Parser, Tag};

use super::plain_text::{decode_utf8, FORM_FEED};
use crate::domain::ingestion::{Page, PageExtractor};
use crate::domain::DomainError;

/// Renders Markdown to plain text. Form feeds separate pages as in plain
/// text files.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self
    }

    fn render_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                Event::Start(Tag::Heading(..))
                | Event::Start(Tag::Paragraph)
                | Event::Start(Tag::CodeBlock(_)) => {
                    if !text.is_empty() && !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                Event::End(Tag::Heading(..))
                | Event::End(Tag::Paragraph)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                Event::Start(Tag::Item) => {
                    if !text.is_empty() && !text.ends_with('\n') {
                        text.push('\n');
                    }
                    text.push_str("• ");
                }
                Event::End(Tag::Item) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

impl PageExtractor for MarkdownExtractor {
    fn extract(&self, content: &[u8]) -> Result<Vec<Page>, DomainError> {
        Ok(decode_utf8(content)?
            .split(FORM_FEED)
            .map(|page| Page::Text(Self::render_text(page)))
            .collect())
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_one(markdown: &str) -> String {
        match MarkdownExtractor::new().extract(markdown.as_bytes()).unwrap().remove(0) {
            Page::Text(text) => text,
            Page::Unreadable(reason) => panic!("unreadable: {}", reason),
        }
    }

    #[test]
    fn test_heading_and_paragraph() {
        let text = extract_one("# Hello World\n\nThis is a paragraph.");
        assert_eq!(text, "Hello World\nThis is a paragraph.");
    }

    #[test]
    fn test_formatting_markers_removed() {
        let text = extract_one("**bold** and *italic* text");
        assert_eq!(text, "bold and italic text");
    }

    #[test]
    fn test_code_kept() {
        let text = extract_one("Some `inline code` here.\n\n```rust\nlet x = 1;\n```");

        assert!(text.contains("inline code"));
        assert!(text.contains("let x = 1;"));
        assert!(!text.contains("```"));
    }

    #[test]
    fn test_list_items() {
        let text = extract_one("- Item 1\n- Item 2");
        assert_eq!(text, "• Item 1\n• Item 2");
    }

    #[test]
    fn test_form_feed_pages() {
        let pages = MarkdownExtractor::new()
            .extract("# One\u{0C}# Two".as_bytes())
            .unwrap();

        assert_eq!(pages, vec![Page::text("One"), Page::text("Two")]);
    }
}
