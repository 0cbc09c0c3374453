//! Text to vector conversion with count and dimension checks

use std::sync::Arc;

use tracing::debug;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::knowledge_base::KnowledgeItem;
use crate::domain::DomainError;

/// Embeds text with a fixed model and dimensionality.
///
/// A batch either comes back whole, one vector of `dimensions` floats per
/// input in input order, or fails with `Embedding`.
#[derive(Debug, Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    dimensions: usize,
}

impl EmbeddingService {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            dimensions,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs = texts.iter().map(|t| t.replace('\n', " ")).collect();
        let provider = self.provider.provider_name();

        let response = self
            .provider
            .embed(EmbeddingRequest::new(&self.model, inputs))
            .await
            .map_err(|e| e.into_embedding(provider))?;

        if response.len() != texts.len() {
            return Err(DomainError::embedding(
                provider,
                format!(
                    "expected {} vectors, got {}",
                    texts.len(),
                    response.len()
                ),
            ));
        }

        if let Some(bad) = response
            .vectors()
            .iter()
            .find(|v| v.len() != self.dimensions)
        {
            return Err(DomainError::embedding(
                provider,
                format!(
                    "expected {} dimensions, got {}",
                    self.dimensions,
                    bad.len()
                ),
            ));
        }

        debug!(model = %self.model, count = texts.len(), "Embedded texts");
        Ok(response.into_vectors())
    }

    /// Embed a single text as a query-side item with no source document
    pub async fn embed_document(&self, text: &str) -> Result<KnowledgeItem, DomainError> {
        let mut vectors = self.embed(&[text.to_string()]).await?;

        let embedding = vectors.pop().ok_or_else(|| {
            DomainError::embedding(self.provider.provider_name(), "no vector returned")
        })?;

        Ok(KnowledgeItem::new(embedding, "", text))
    }

    /// Embed `chunks` and pair each with its vector
    pub async fn embed_chunks(
        &self,
        source: &str,
        chunks: &[String],
    ) -> Result<Vec<KnowledgeItem>, DomainError> {
        let vectors = self.embed(chunks).await?;

        Ok(chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, embedding)| KnowledgeItem::new(embedding, source, chunk.as_str()))
            .collect())
    }
}
