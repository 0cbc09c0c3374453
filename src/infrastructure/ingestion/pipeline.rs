//! Ingestion pipeline service

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::domain::ingestion::{
    DocumentReport, DocumentSource, IngestionSummary, Page, PageAccumulator, SourceDocument,
    TextSplitter,
};
use crate::domain::knowledge_base::VectorStore;
use crate::domain::{Deadline, DomainError};
use crate::infrastructure::observability::record_ingestion_flush;
use crate::infrastructure::services::EmbeddingService;

/// Moves documents into the vector store: pages are buffered, and every
/// flush goes through split, embed and a single upsert. Each flush gets its
/// own deadline covering the embedding and upsert calls.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    splitter: Arc<dyn TextSplitter>,
    embedder: Arc<EmbeddingService>,
    store: Arc<dyn VectorStore>,
    flush_threshold: usize,
    flush_timeout: Duration,
}

impl IngestionPipeline {
    pub fn new(
        splitter: Arc<dyn TextSplitter>,
        embedder: Arc<EmbeddingService>,
        store: Arc<dyn VectorStore>,
        flush_threshold: usize,
        flush_timeout: Duration,
    ) -> Self {
        Self {
            splitter,
            embedder,
            store,
            flush_threshold,
            flush_timeout,
        }
    }

    /// Ingest every document of `source`. Documents are loaded one at a time
    /// and dropped once stored.
    pub async fn ingest_source(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<IngestionSummary, DomainError> {
        let paths = source.paths().await?;
        let mut summary = IngestionSummary::new();

        for path in &paths {
            let report = match source.load(path).await {
                Ok(document) => self.ingest_document(&document).await,
                Err(e) => {
                    error!(document = %path, error = %e, "Failed to load document");
                    let mut report = DocumentReport::new(path);
                    report.errors.push(e.to_string());
                    report.failed = true;
                    report
                }
            };
            summary.add(report);
        }

        info!(
            documents = summary.total_documents,
            failed = summary.failed,
            chunks = summary.total_chunks_stored(),
            "Ingestion finished"
        );

        Ok(summary)
    }

    /// Ingest one document. Failures are recorded in the report rather than
    /// returned: a failed mid-document flush is skipped, a failed final flush
    /// marks the document failed.
    #[instrument(skip(self, document), fields(document = %document.path))]
    pub async fn ingest_document(&self, document: &SourceDocument) -> DocumentReport {
        let mut report = DocumentReport::new(&document.path);
        let mut buffer = PageAccumulator::new(self.flush_threshold);

        for (index, page) in document.pages.iter().enumerate() {
            let text = match page {
                Page::Text(text) => text,
                Page::Unreadable(reason) => {
                    warn!(page = index, reason = %reason, "Skipping unreadable page");
                    report.pages_skipped += 1;
                    continue;
                }
            };

            if let Some(batch) = buffer.push(text) {
                if let Err(e) = self.flush_into(&mut report, &document.path, &batch).await {
                    error!(page = index, error = %e, "Flush failed, continuing with next page");
                    report.errors.push(e.to_string());
                }
            }
        }

        if let Some(batch) = buffer.finish() {
            if let Err(e) = self.flush_into(&mut report, &document.path, &batch).await {
                error!(error = %e, "Final flush failed");
                report.errors.push(e.to_string());
                report.failed = true;
            }
        }

        debug!(
            flushes = report.flushes,
            chunks = report.chunks_stored,
            "Document ingested"
        );

        report
    }

    async fn flush_into(
        &self,
        report: &mut DocumentReport,
        path: &str,
        text: &str,
    ) -> Result<(), DomainError> {
        report.flushes += 1;

        let stored = self.flush(path, text).await?;
        report.chunks_stored += stored;
        record_ingestion_flush(stored);

        Ok(())
    }

    async fn flush(&self, path: &str, text: &str) -> Result<usize, DomainError> {
        let chunks = self.splitter.split(text)?;

        if chunks.is_empty() {
            return Ok(0);
        }

        let deadline = Deadline::after(self.flush_timeout);
        let items = deadline
            .run("embed chunks", self.embedder.embed_chunks(path, &chunks))
            .await?;
        let result = deadline.run("upsert chunks", self.store.upsert(items)).await?;

        debug!(chunks = result.upserted, status = %result.status, "Flushed batch");
        Ok(result.upserted)
    }
}
