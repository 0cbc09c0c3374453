//! Context retrieval for a user query

use std::sync::Arc;

use tracing::debug;

use super::EmbeddingService;
use crate::domain::knowledge_base::{SearchConfig, SearchResult, VectorStore};
use crate::domain::{Deadline, DomainError};

/// Embeds a query and looks up the closest stored passage
#[derive(Debug, Clone)]
pub struct RetrievalService {
    embedder: Arc<EmbeddingService>,
    store: Arc<dyn VectorStore>,
    search: SearchConfig,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<EmbeddingService>,
        store: Arc<dyn VectorStore>,
        search: SearchConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            search,
        }
    }

    /// All hits for `query`, best first
    pub async fn search(
        &self,
        query: &str,
        deadline: &Deadline,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let item = deadline
            .run("embed query", self.embedder.embed_document(query))
            .await?;

        deadline
            .run(
                "vector search",
                self.store.search(&item.embedding, &self.search),
            )
            .await
    }

    /// Chunk text of the single best hit, or an empty string when nothing
    /// clears the score threshold
    pub async fn retrieve_context(
        &self,
        query: &str,
        deadline: &Deadline,
    ) -> Result<String, DomainError> {
        let hits = self.search(query, deadline).await?;

        match hits.into_iter().next() {
            Some(best) => {
                debug!(
                    source = %best.item.source_document,
                    score = best.score,
                    "Retrieved context"
                );
                Ok(best.item.chunk)
            }
            None => {
                debug!("No context above threshold");
                Ok(String::new())
            }
        }
    }
}
