//! Vector store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{CollectionSpec, KnowledgeItem, SearchConfig, SearchResult};
use crate::domain::error::DomainError;

/// Result of writing a batch of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResult {
    pub upserted: usize,
    pub failed: usize,
    pub status: String,
}

impl UpsertResult {
    pub fn completed(upserted: usize) -> Self {
        Self {
            upserted,
            failed: 0,
            status: "completed".to_string(),
        }
    }
}

/// Persistence and nearest-neighbour search over embedded passages.
///
/// Implementations own their connection and the backing collection. The
/// collection is provisioned lazily, exactly once, before the first read or
/// write; concurrent first callers wait for the same initialization.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the backend name
    fn store_type(&self) -> &'static str;

    /// Run the one-time collection provisioning now instead of on first use.
    /// A failed attempt is retried by the next caller.
    async fn initialize(&self) -> Result<(), DomainError>;

    /// Make sure `spec` exists. With `truncate`, an existing collection is
    /// dropped and recreated empty.
    async fn ensure_collection(&self, spec: &CollectionSpec, truncate: bool)
        -> Result<(), DomainError>;

    /// Write items under fresh identifiers with their source path and chunk
    /// as payload. No rollback on partial failure.
    async fn upsert(&self, items: Vec<KnowledgeItem>) -> Result<UpsertResult, DomainError>;

    /// Nearest neighbours of `vector`, highest score first, none below the
    /// configured threshold. Each hit carries its stored vector.
    async fn search(
        &self,
        vector: &[f32],
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, DomainError>;

    /// Check the backend is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;

    /// Release the connection; later calls fail with `StoreUnavailable`
    async fn close(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::knowledge_base::PointId;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug, Default)]
    pub struct MockVectorStore {
        upserts: Mutex<Vec<Vec<KnowledgeItem>>>,
        ensured: Mutex<Vec<(CollectionSpec, bool)>>,
        searches: Mutex<Vec<(Vec<f32>, SearchConfig)>>,
        results: Vec<(f32, KnowledgeItem)>,
        fail_upsert_call: Option<usize>,
        error: Option<String>,
        closed: AtomicBool,
    }

    impl MockVectorStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Canned hits returned from every search (still ranked and filtered)
        pub fn with_result(mut self, score: f32, item: KnowledgeItem) -> Self {
            self.results.push((score, item));
            self
        }

        /// Fail the n-th upsert call (0-based)
        pub fn failing_upsert(mut self, call: usize) -> Self {
            self.fail_upsert_call = Some(call);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn upserts(&self) -> Vec<Vec<KnowledgeItem>> {
            self.upserts.lock().unwrap().clone()
        }

        pub fn ensured(&self) -> Vec<(CollectionSpec, bool)> {
            self.ensured.lock().unwrap().clone()
        }

        pub fn searches(&self) -> Vec<(Vec<f32>, SearchConfig)> {
            self.searches.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), DomainError> {
            if self.closed.load(Ordering::SeqCst) {
                return Err(DomainError::store_unavailable("store closed"));
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::store_unavailable(error));
            }

            Ok(())
        }
    }

    #[async_trait]
    impl VectorStore for MockVectorStore {
        fn store_type(&self) -> &'static str {
            "mock"
        }

        async fn initialize(&self) -> Result<(), DomainError> {
            self.check()
        }

        async fn ensure_collection(
            &self,
            spec: &CollectionSpec,
            truncate: bool,
        ) -> Result<(), DomainError> {
            self.check()?;
            self.ensured.lock().unwrap().push((spec.clone(), truncate));
            Ok(())
        }

        async fn upsert(&self, items: Vec<KnowledgeItem>) -> Result<UpsertResult, DomainError> {
            self.check()?;

            let mut upserts = self.upserts.lock().unwrap();
            if self.fail_upsert_call == Some(upserts.len()) {
                upserts.push(Vec::new());
                return Err(DomainError::store_unavailable("mock upsert failure"));
            }

            let count = items.len();
            upserts.push(items);
            Ok(UpsertResult::completed(count))
        }

        async fn search(
            &self,
            vector: &[f32],
            config: &SearchConfig,
        ) -> Result<Vec<SearchResult>, DomainError> {
            self.check()?;
            self.searches
                .lock()
                .unwrap()
                .push((vector.to_vec(), config.clone()));

            let hits = self
                .results
                .iter()
                .map(|(score, item)| SearchResult {
                    id: PointId::random(),
                    score: *score,
                    item: item.clone(),
                })
                .collect();

            Ok(SearchResult::rank(hits, config.score_threshold))
        }

        async fn health_check(&self) -> Result<bool, DomainError> {
            Ok(self.check().is_ok())
        }

        async fn close(&self) -> Result<(), DomainError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }
}
