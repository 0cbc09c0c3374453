//! Ingestion pipeline policy, configuration and reports

use serde::{Deserialize, Serialize};

use super::chunker::ChunkingConfig;

/// Configuration for document ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Buffered characters that trigger a flush mid-document
    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: usize,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Corpus directory walked by the `ingest` command
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: String,
    /// Extensions to ingest; empty means every extension an extractor handles
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_flush_threshold() -> usize {
    3000
}

fn default_corpus_dir() -> String {
    "text-data-corpus".to_string()
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            flush_threshold: default_flush_threshold(),
            chunking: ChunkingConfig::default(),
            corpus_dir: default_corpus_dir(),
            extensions: Vec::new(),
        }
    }
}

/// Buffers page text until it is large enough to be worth a flush.
///
/// Length is counted in characters, not bytes.
#[derive(Debug)]
pub struct PageAccumulator {
    threshold: usize,
    buffer: String,
    chars: usize,
}

impl PageAccumulator {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            buffer: String::new(),
            chars: 0,
        }
    }

    /// Append a page; returns the buffered text once it reaches the threshold
    pub fn push(&mut self, page: &str) -> Option<String> {
        self.buffer.push_str(page);
        self.chars += page.chars().count();

        if self.chars >= self.threshold {
            return self.take();
        }

        None
    }

    /// End of document: whatever remains, if anything
    pub fn finish(mut self) -> Option<String> {
        self.take()
    }

    pub fn buffered_chars(&self) -> usize {
        self.chars
    }

    fn take(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }

        self.chars = 0;
        Some(std::mem::take(&mut self.buffer))
    }
}

/// Outcome of ingesting one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentReport {
    pub document: String,
    pub flushes: usize,
    pub chunks_stored: usize,
    pub pages_skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Set when the final flush failed and the document is incomplete
    pub failed: bool,
}

impl DocumentReport {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        !self.failed
    }
}

/// Outcome of an ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestionSummary {
    pub total_documents: usize,
    pub successful: usize,
    pub failed: usize,
    pub reports: Vec<DocumentReport>,
}

impl IngestionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, report: DocumentReport) {
        self.total_documents += 1;

        if report.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }

        self.reports.push(report);
    }

    pub fn total_chunks_stored(&self) -> usize {
        self.reports.iter().map(|r| r.chunks_stored).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_does_not_flush() {
        let mut acc = PageAccumulator::new(10);

        assert_eq!(acc.push("abcd"), None);
        assert_eq!(acc.buffered_chars(), 4);
    }

    #[test]
    fn test_crossing_threshold_flushes_once_and_resets() {
        let mut acc = PageAccumulator::new(10);

        assert_eq!(acc.push("abcdef"), None);
        assert_eq!(acc.push("ghijkl"), Some("abcdefghijkl".to_string()));
        assert_eq!(acc.buffered_chars(), 0);
        assert_eq!(acc.push("m"), None);
    }

    #[test]
    fn test_reaching_threshold_exactly_flushes() {
        let mut acc = PageAccumulator::new(3);
        assert_eq!(acc.push("abc"), Some("abc".to_string()));
    }

    #[test]
    fn test_finish_flushes_remainder() {
        let mut acc = PageAccumulator::new(10);
        acc.push("tail");

        assert_eq!(acc.finish(), Some("tail".to_string()));
    }

    #[test]
    fn test_finish_on_empty_buffer_yields_nothing() {
        let mut acc = PageAccumulator::new(3);
        acc.push("abc");

        assert_eq!(acc.finish(), None);
        assert_eq!(PageAccumulator::new(3).finish(), None);
    }

    #[test]
    fn test_threshold_counts_characters() {
        let mut acc = PageAccumulator::new(4);

        // 3 characters, 9 bytes
        assert_eq!(acc.push("日本語"), None);
        assert!(acc.push("!").is_some());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = IngestionSummary::new();
        let mut ok = DocumentReport::new("a.txt");
        ok.chunks_stored = 3;
        let mut bad = DocumentReport::new("b.txt");
        bad.failed = true;

        summary.add(ok);
        summary.add(bad);

        assert_eq!(summary.total_documents, 2);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_chunks_stored(), 3);
    }
}
