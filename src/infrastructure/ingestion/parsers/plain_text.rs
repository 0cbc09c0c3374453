//! Plain text page extraction

use crate::domain::ingestion::{Page, PageExtractor};
use crate::domain::DomainError;

/// Page separator in plain text files
pub const FORM_FEED: char = '\u{0C}';

pub(super) fn decode_utf8(content: &[u8]) -> Result<&str, DomainError> {
    std::str::from_utf8(content)
        .map_err(|e| DomainError::validation(format!("content is not valid UTF-8: {}", e)))
}

/// Extracts pages from plain text, one page per form-feed separated section
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageExtractor for PlainTextExtractor {
    fn extract(&self, content: &[u8]) -> Result<Vec<Page>, DomainError> {
        Ok(decode_utf8(content)?.split(FORM_FEED).map(Page::text).collect())
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "text"]
    }

    fn name(&self) -> &'static str {
        "plain_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let pages = PlainTextExtractor::new().extract(b"Hello, World!").unwrap();
        assert_eq!(pages, vec![Page::text("Hello, World!")]);
    }

    #[test]
    fn test_form_feed_splits_pages() {
        let pages = PlainTextExtractor::new()
            .extract("page one\u{0C}page two\u{0C}".as_bytes())
            .unwrap();

        assert_eq!(
            pages,
            vec![Page::text("page one"), Page::text("page two"), Page::text("")]
        );
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        assert!(PlainTextExtractor::new().extract(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(PlainTextExtractor::new().extensions(), &["txt", "text"]);
    }
}
