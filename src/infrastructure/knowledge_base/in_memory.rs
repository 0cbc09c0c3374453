//! In-memory vector store for development and testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

use crate::domain::embedding::cosine_similarity;
use crate::domain::knowledge_base::{
    CollectionSpec, DistanceMetric, KnowledgeItem, PointId, SearchConfig, SearchResult,
    UpsertResult, VectorStore,
};
use crate::domain::DomainError;

#[derive(Debug)]
struct Collection {
    dimensions: usize,
    points: Vec<(PointId, KnowledgeItem)>,
}

/// Brute-force cosine search over points held in process memory.
///
/// Nothing survives a restart. Only the cosine metric is supported.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    spec: CollectionSpec,
    truncate_on_start: bool,
    collections: RwLock<HashMap<String, Collection>>,
    ready: OnceCell<()>,
    closed: AtomicBool,
}

impl InMemoryVectorStore {
    pub fn new(spec: CollectionSpec) -> Self {
        Self {
            spec,
            truncate_on_start: false,
            collections: RwLock::new(HashMap::new()),
            ready: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_truncate_on_start(mut self, truncate: bool) -> Self {
        self.truncate_on_start = truncate;
        self
    }

    /// Number of points in the configured collection
    pub async fn len(&self) -> usize {
        self.collections
            .read()
            .await
            .get(&self.spec.name)
            .map(|c| c.points.len())
            .unwrap_or(0)
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("vector store is closed"));
        }

        Ok(())
    }

    async fn ready(&self) -> Result<(), DomainError> {
        self.ensure_open()?;

        self.ready
            .get_or_try_init(|| async {
                self.ensure_collection(&self.spec, self.truncate_on_start)
                    .await
            })
            .await?;

        Ok(())
    }

    fn check_vector(&self, vector: &[f32]) -> Result<(), DomainError> {
        if vector.len() != self.spec.dimensions {
            return Err(DomainError::validation(format!(
                "vector has {} dimensions, collection expects {}",
                vector.len(),
                self.spec.dimensions
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_type(&self) -> &'static str {
        "memory"
    }

    async fn initialize(&self) -> Result<(), DomainError> {
        self.ready().await
    }

    async fn ensure_collection(
        &self,
        spec: &CollectionSpec,
        truncate: bool,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        if spec.distance != DistanceMetric::Cosine {
            return Err(DomainError::configuration(format!(
                "in-memory store only supports Cosine distance, got {}",
                spec.distance.as_str()
            )));
        }

        let mut collections = self.collections.write().await;

        match collections.get_mut(&spec.name) {
            Some(existing) if truncate => {
                existing.points.clear();
                existing.dimensions = spec.dimensions;
                debug!(collection = %spec.name, "Truncated collection");
            }
            Some(existing) if existing.dimensions != spec.dimensions => {
                return Err(DomainError::configuration(format!(
                    "collection '{}' has {} dimensions, expected {}",
                    spec.name, existing.dimensions, spec.dimensions
                )));
            }
            Some(_) => {}
            None => {
                collections.insert(
                    spec.name.clone(),
                    Collection {
                        dimensions: spec.dimensions,
                        points: Vec::new(),
                    },
                );
                debug!(collection = %spec.name, "Created collection");
            }
        }

        Ok(())
    }

    async fn upsert(&self, items: Vec<KnowledgeItem>) -> Result<UpsertResult, DomainError> {
        for item in &items {
            self.check_vector(&item.embedding)?;
        }

        self.ready().await?;

        let mut collections = self.collections.write().await;
        let collection = collections
            .get_mut(&self.spec.name)
            .ok_or_else(|| DomainError::store_unavailable("collection disappeared"))?;

        let count = items.len();
        collection
            .points
            .extend(items.into_iter().map(|item| (PointId::random(), item)));

        Ok(UpsertResult::completed(count))
    }

    async fn search(
        &self,
        vector: &[f32],
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.check_vector(vector)?;
        self.ready().await?;

        let collections = self.collections.read().await;
        let Some(collection) = collections.get(&self.spec.name) else {
            return Ok(Vec::new());
        };

        let hits = collection
            .points
            .iter()
            .map(|(id, item)| SearchResult {
                id: id.clone(),
                score: cosine_similarity(vector, &item.embedding),
                item: item.clone(),
            })
            .collect();

        let mut ranked = SearchResult::rank(hits, config.score_threshold);
        ranked.truncate(config.limit as usize);

        Ok(ranked)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(!self.closed.load(Ordering::SeqCst))
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;

    fn store() -> InMemoryVectorStore {
        InMemoryVectorStore::new(CollectionSpec::new("rag", 3))
    }

    fn item(vector: Vec<f32>, chunk: &str) -> KnowledgeItem {
        KnowledgeItem::new(vector, "doc.txt", chunk)
    }

    #[tokio::test]
    async fn test_stored_item_is_its_own_best_match() {
        let store = store();
        store
            .upsert(vec![
                item(vec![1.0, 0.0, 0.0], "x"),
                item(vec![0.0, 1.0, 0.0], "y"),
            ])
            .await
            .unwrap();

        let hits = store
            .search(&[1.0, 0.0, 0.0], &SearchConfig::default())
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.chunk, "x");
        assert!((hits[0].score - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_self_match_leads_with_zero_threshold() {
        let store = store();
        store
            .upsert(vec![
                item(vec![0.0, 1.0, 0.0], "y"),
                item(vec![1.0, 0.0, 0.0], "x"),
            ])
            .await
            .unwrap();

        let config = SearchConfig::default().with_score_threshold(0.0);
        let hits = store.search(&[1.0, 0.0, 0.0], &config).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].item.chunk, "x");
        assert_eq!(hits[0].item.embedding, vec![1.0, 0.0, 0.0]);
        assert!((hits[0].score - 1.0).abs() < 1e-5);
        assert!(hits[1].score.abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_results_descend_and_respect_limit() {
        let store = store();
        store
            .upsert(vec![
                item(vec![0.5, 0.5, 0.0], "half"),
                item(vec![1.0, 0.0, 0.0], "exact"),
                item(vec![0.9, 0.1, 0.0], "close"),
            ])
            .await
            .unwrap();

        let config = SearchConfig::default().with_limit(2).with_score_threshold(0.0);
        let hits = store.search(&[1.0, 0.0, 0.0], &config).await.unwrap();

        let chunks: Vec<&str> = hits.iter().map(|h| h.item.chunk.as_str()).collect();
        assert_eq!(chunks, vec!["exact", "close"]);
    }

    #[tokio::test]
    async fn test_threshold_excludes_weak_matches() {
        let store = store();
        store
            .upsert(vec![item(vec![0.0, 0.0, 1.0], "orthogonal")])
            .await
            .unwrap();

        let hits = store
            .search(&[1.0, 0.0, 0.0], &SearchConfig::default())
            .await
            .unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_on_empty_store() {
        let hits = store()
            .search(&[1.0, 0.0, 0.0], &SearchConfig::default())
            .await
            .unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_truncate_clears_collection() {
        let store = store();
        store.upsert(vec![item(vec![1.0, 0.0, 0.0], "x")]).await.unwrap();
        assert_eq!(store.len().await, 1);

        store
            .ensure_collection(&CollectionSpec::new("rag", 3), true)
            .await
            .unwrap();

        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch() {
        let store = store();

        let err = store
            .upsert(vec![item(vec![1.0, 0.0], "x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        store.initialize().await.unwrap();
        let err = store
            .ensure_collection(&CollectionSpec::new("rag", 5), false)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_non_cosine_metric_is_rejected() {
        let store = InMemoryVectorStore::new(
            CollectionSpec::new("rag", 3).with_distance(DistanceMetric::Dot),
        );

        let err = store.initialize().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = store();
        store.close().await.unwrap();

        let err = store
            .search(&[1.0, 0.0, 0.0], &SearchConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        assert!(!store.health_check().await.unwrap());
    }
}
