//! Document sources and page extraction

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// One page of a source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Extracted text
    Text(String),
    /// The page could not be read; carries the reason
    Unreadable(String),
}

impl Page {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::Unreadable(reason.into())
    }
}

/// A document as a sequence of pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: String,
    pub pages: Vec<Page>,
}

impl SourceDocument {
    pub fn new(path: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            path: path.into(),
            pages,
        }
    }

    /// A document with a single page of text
    pub fn single_page(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(path, vec![Page::text(text)])
    }
}

/// Turns raw file content into page texts
pub trait PageExtractor: Send + Sync + Debug {
    /// Split `content` into pages. A page that cannot be converted comes back
    /// as `Page::Unreadable` rather than failing the whole document.
    fn extract(&self, content: &[u8]) -> Result<Vec<Page>, DomainError>;

    /// File extensions this extractor handles, lowercase without the dot
    fn extensions(&self) -> &'static [&'static str];

    fn name(&self) -> &'static str;
}

/// A corpus, read one document at a time.
///
/// `paths` lists what is there without reading content; `load` reads a
/// single document so callers never hold more than one in memory.
#[async_trait]
pub trait DocumentSource: Send + Sync + Debug {
    async fn paths(&self) -> Result<Vec<String>, DomainError>;

    async fn load(&self, path: &str) -> Result<SourceDocument, DomainError>;
}
