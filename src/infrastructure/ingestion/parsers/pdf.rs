//! PDF page extraction

use std::fmt::Display;

use lopdf::Document;
use tracing::debug;

use crate::domain::ingestion::{Page, PageExtractor};
use crate::domain::DomainError;

/// Extracts the text of every PDF page in page order
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn page_from<E: Display>(number: u32, text: Result<String, E>) -> Page {
    match text {
        Ok(text) => Page::Text(text),
        Err(e) => Page::Unreadable(format!("page {}: {}", number, e)),
    }
}

impl PageExtractor for PdfExtractor {
    /// Fails only when the file is not a PDF at all; a page whose text cannot
    /// be decoded comes back unreadable and the rest are kept.
    fn extract(&self, content: &[u8]) -> Result<Vec<Page>, DomainError> {
        let document = Document::load_mem(content)
            .map_err(|e| DomainError::validation(format!("not a readable PDF: {}", e)))?;

        let pages: Vec<Page> = document
            .get_pages()
            .keys()
            .map(|&number| page_from(number, document.extract_text(&[number])))
            .collect();

        debug!(pages = pages.len(), "Extracted PDF pages");
        Ok(pages)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pdf"]
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_page_per_pdf_page() {
        let pages = PdfExtractor::new()
            .extract(&fixture::pdf(&["alpha page", "beta page"]))
            .unwrap();

        assert_eq!(pages.len(), 2);
        match (&pages[0], &pages[1]) {
            (Page::Text(first), Page::Text(second)) => {
                assert!(first.contains("alpha page"));
                assert!(second.contains("beta page"));
            }
            other => panic!("expected text pages, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_page_is_unreadable() {
        assert_eq!(page_from(1, Ok::<_, String>("text".to_string())), Page::text("text"));

        match page_from(3, Err::<String, _>("unsupported font encoding")) {
            Page::Unreadable(reason) => {
                assert!(reason.starts_with("page 3"));
                assert!(reason.contains("unsupported font encoding"));
            }
            page => panic!("expected unreadable page, got {:?}", page),
        }
    }

    #[test]
    fn test_not_a_pdf_is_error() {
        let err = PdfExtractor::new().extract(b"plain words").unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
