//! Corpus directory walker

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::ingestion::{DocumentSource, Page, PageExtractor, SourceDocument};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::parsers::{MarkdownExtractor, PdfExtractor, PlainTextExtractor};

/// Yields every regular file under a root directory that an extractor
/// handles. Files are visited in file-name order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extractors: Vec<Arc<dyn PageExtractor>>,
    allowed: Vec<String>,
}

impl DirectorySource {
    /// Source with the plain text, Markdown and PDF extractors registered
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extractors: vec![
                Arc::new(PlainTextExtractor::new()),
                Arc::new(MarkdownExtractor::new()),
                Arc::new(PdfExtractor::new()),
            ],
            allowed: Vec::new(),
        }
    }

    /// Restrict ingestion to these extensions; empty allows all registered ones
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.allowed = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    fn extractor_for(&self, path: &Path) -> Option<&Arc<dyn PageExtractor>> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        if !self.allowed.is_empty() && !self.allowed.contains(&extension) {
            return None;
        }

        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&extension.as_str()))
    }

    fn files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn paths(&self) -> Result<Vec<String>, DomainError> {
        if !self.root.is_dir() {
            return Err(DomainError::validation(format!(
                "corpus directory '{}' does not exist",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();

        for path in self.files() {
            if self.extractor_for(&path).is_none() {
                debug!(path = %path.display(), "Skipping file without extractor");
                continue;
            }

            paths.push(path.display().to_string());
        }

        info!(
            root = %self.root.display(),
            documents = paths.len(),
            "Listed corpus documents"
        );

        Ok(paths)
    }

    /// Read and extract one file. A file that cannot be read or converted
    /// yields a single unreadable page.
    async fn load(&self, path: &str) -> Result<SourceDocument, DomainError> {
        let extractor = self.extractor_for(Path::new(path)).ok_or_else(|| {
            DomainError::validation(format!("no extractor registered for '{}'", path))
        })?;

        let pages = match tokio::fs::read(path).await {
            Ok(content) => extractor.extract(&content).unwrap_or_else(|e| {
                vec![Page::unreadable(format!("{} extraction failed: {}", extractor.name(), e))]
            }),
            Err(e) => vec![Page::unreadable(format!("read failed: {}", e))],
        };

        Ok(SourceDocument::new(path, pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ingestion::parsers::pdf_fixture;
    use std::fs;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "first page\u{0C}second page").unwrap();
        fs::write(dir.path().join("a.md"), "# Title\n\nBody text.").unwrap();
        fs::write(dir.path().join("image.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.TXT"), "nested").unwrap();
        dir
    }

    fn file_names(paths: &[String]) -> Vec<String> {
        paths
            .iter()
            .map(|p| Path::new(p).file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_lists_supported_files_in_order() {
        let dir = corpus();

        let paths = DirectorySource::new(dir.path()).paths().await.unwrap();

        assert_eq!(file_names(&paths), vec!["a.md", "b.txt", "c.TXT"]);
    }

    #[tokio::test]
    async fn test_load_extracts_pages() {
        let dir = corpus();
        let source = DirectorySource::new(dir.path());
        let paths = source.paths().await.unwrap();

        let markdown = source.load(&paths[0]).await.unwrap();
        let text = source.load(&paths[1]).await.unwrap();

        assert_eq!(markdown.path, paths[0]);
        assert_eq!(markdown.pages, vec![Page::text("Title\nBody text.")]);
        assert_eq!(
            text.pages,
            vec![Page::text("first page"), Page::text("second page")]
        );
    }

    #[tokio::test]
    async fn test_pdf_pages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("report.pdf"), pdf_fixture(&["intro", "results"])).unwrap();
        let source = DirectorySource::new(dir.path());

        let paths = source.paths().await.unwrap();
        let document = source.load(&paths[0]).await.unwrap();

        assert_eq!(file_names(&paths), vec!["report.pdf"]);
        assert_eq!(document.pages.len(), 2);
        assert!(matches!(&document.pages[1], Page::Text(text) if text.contains("results")));
    }

    #[tokio::test]
    async fn test_extension_filter() {
        let dir = corpus();

        let paths = DirectorySource::new(dir.path())
            .with_extensions(&[".md".to_string()])
            .paths()
            .await
            .unwrap();

        assert_eq!(file_names(&paths), vec!["a.md"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_becomes_unreadable_page() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();
        let source = DirectorySource::new(dir.path());

        let paths = source.paths().await.unwrap();
        let document = source.load(&paths[0]).await.unwrap();

        assert_eq!(document.pages.len(), 1);
        assert!(matches!(document.pages[0], Page::Unreadable(_)));
    }

    #[tokio::test]
    async fn test_missing_file_becomes_unreadable_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt").display().to_string();

        let document = DirectorySource::new(dir.path()).load(&path).await.unwrap();

        assert!(matches!(&document.pages[0], Page::Unreadable(reason) if reason.starts_with("read failed")));
    }

    #[tokio::test]
    async fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();

        let err = DirectorySource::new(dir.path().join("missing"))
            .paths()
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
