//! Qdrant vector store over the REST API

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::knowledge_base::{
    CollectionSpec, KnowledgeItem, PointId, SearchConfig, SearchResult, UpsertResult, VectorStore,
};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

/// Qdrant connection settings
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: CollectionSpec,
    /// Drop and recreate the collection when the store first initializes
    pub truncate_on_start: bool,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>, collection: CollectionSpec) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: None,
            collection,
            truncate_on_start: false,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_truncate_on_start(mut self, truncate: bool) -> Self {
        self.truncate_on_start = truncate;
        self
    }
}

/// Vector store backed by a Qdrant collection.
///
/// The collection is provisioned once, on first use or on `initialize`.
/// After `close` every operation fails with `StoreUnavailable` and the
/// health check reports not ready.
#[derive(Debug)]
pub struct QdrantVectorStore<C: HttpClientTrait> {
    client: C,
    config: QdrantConfig,
    ready: OnceCell<()>,
    closed: AtomicBool,
}

impl<C: HttpClientTrait> QdrantVectorStore<C> {
    pub fn new(client: C, config: QdrantConfig) -> Self {
        Self {
            client,
            config,
            ready: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn collection(&self) -> &CollectionSpec {
        &self.config.collection
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.config.url, name)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        match self.config.api_key {
            Some(ref key) => vec![("api-key", key.as_str())],
            None => vec![],
        }
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
                self.ensure_collection(&self.config.collection, self.config.truncate_on_start)
                    .await
            })
            .await?;

        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, DomainError> {
        let url = format!("{}/exists", self.collection_url(name));
        let json = self
            .client
            .get_json(&url, self.headers())
            .await
            .map_err(DomainError::into_store)?;

        let response: QdrantResponse<ExistsResult> = parse(json)?;
        Ok(response.result.exists)
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), DomainError> {
        let body = serde_json::json!({
            "vectors": {
                "size": spec.dimensions,
                "distance": spec.distance.as_str(),
            }
        });

        self.client
            .put_json(&self.collection_url(&spec.name), self.headers(), &body)
            .await
            .map_err(DomainError::into_store)?;

        info!(collection = %spec.name, dimensions = spec.dimensions, "Created collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), DomainError> {
        self.client
            .delete(&self.collection_url(name), self.headers())
            .await
            .map_err(DomainError::into_store)?;

        info!(collection = %name, "Deleted collection");
        Ok(())
    }

    async fn check_dimensions(&self, spec: &CollectionSpec) -> Result<(), DomainError> {
        let json = self
            .client
            .get_json(&self.collection_url(&spec.name), self.headers())
            .await
            .map_err(DomainError::into_store)?;

        let size = json
            .pointer("/result/config/params/vectors/size")
            .and_then(|v| v.as_u64());

        match size {
            Some(size) if size as usize != spec.dimensions => Err(DomainError::configuration(format!(
                "collection '{}' has {} dimensions, expected {}",
                spec.name, size, spec.dimensions
            ))),
            Some(_) => Ok(()),
            None => {
                warn!(collection = %spec.name, "Could not read collection vector size");
                Ok(())
            }
        }
    }

    fn check_vector(&self, vector: &[f32]) -> Result<(), DomainError> {
        let expected = self.config.collection.dimensions;

        if vector.len() != expected {
            return Err(DomainError::validation(format!(
                "vector has {} dimensions, collection expects {}",
                vector.len(),
                expected
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for QdrantVectorStore<C> {
    fn store_type(&self) -> &'static str {
        "qdrant"
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

        let exists = self.collection_exists(&spec.name).await?;

        match (exists, truncate) {
            (true, false) => {
                debug!(collection = %spec.name, "Collection already exists");
                self.check_dimensions(spec).await
            }
            (true, true) => {
                self.delete_collection(&spec.name).await?;
                self.create_collection(spec).await
            }
            (false, _) => self.create_collection(spec).await,
        }
    }

    async fn upsert(&self, items: Vec<KnowledgeItem>) -> Result<UpsertResult, DomainError> {
        if items.is_empty() {
            return Ok(UpsertResult::completed(0));
        }

        for item in &items {
            self.check_vector(&item.embedding)?;
        }

        self.ready().await?;

        let points: Vec<serde_json::Value> = items
            .into_iter()
            .map(|item| {
                serde_json::json!({
                    "id": PointId::random(),
                    "vector": item.embedding,
                    "payload": {
                        "path": item.source_document,
                        "chunk": item.chunk,
                    }
                })
            })
            .collect();
        let count = points.len();

        let url = format!(
            "{}/points?wait=true",
            self.collection_url(&self.config.collection.name)
        );
        let json = self
            .client
            .put_json(&url, self.headers(), &serde_json::json!({ "points": points }))
            .await
            .map_err(DomainError::into_store)?;

        let response: QdrantResponse<UpdateResult> = parse(json)?;
        debug!(points = count, status = %response.result.status, "Upserted points");

        Ok(UpsertResult {
            upserted: count,
            failed: 0,
            status: response.result.status,
        })
    }

    async fn search(
        &self,
        vector: &[f32],
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.check_vector(vector)?;
        self.ready().await?;

        let body = serde_json::json!({
            "query": vector,
            "limit": config.limit,
            "with_payload": true,
            "with_vector": true,
            "score_threshold": config.score_threshold,
            "params": {
                "hnsw_ef": config.beam_width,
                "exact": config.exact,
                "indexed_only": config.indexed_only,
            }
        });

        let url = format!(
            "{}/points/query",
            self.collection_url(&self.config.collection.name)
        );
        let json = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(DomainError::into_store)?;

        let response: QdrantResponse<QueryResult> = parse(json)?;

        let hits = response
            .result
            .points
            .into_iter()
            .map(|point| SearchResult {
                id: point.id,
                score: point.score,
                item: KnowledgeItem::new(
                    point.vector.unwrap_or_default(),
                    point.payload.path,
                    point.payload.chunk,
                ),
            })
            .collect();

        Ok(SearchResult::rank(hits, config.score_threshold))
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let url = format!("{}/collections", self.config.url);
        match self.client.get_json(&url, self.headers()).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Qdrant health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn close(&self) -> Result<(), DomainError> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("Closed Qdrant vector store");
        }

        Ok(())
    }
}

fn parse<T: for<'de> Deserialize<'de>>(json: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(json)
        .map_err(|e| DomainError::store_unavailable(format!("Unexpected Qdrant response: {}", e)))
}

// Qdrant API types

#[derive(Debug, Deserialize)]
struct QdrantResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ExistsResult {
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct UpdateResult {
    status: String,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    points: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: PointId,
    score: f32,
    #[serde(default)]
    payload: PointPayload,
    #[serde(default)]
    vector: Option<Vec<f32>>,
}

#[derive(Debug, Default, Deserialize)]
struct PointPayload {
    #[serde(default)]
    path: String,
    #[serde(default)]
    chunk: String,
}
