//! Vector store factory

use std::sync::Arc;

use serde::Deserialize;

use super::in_memory::InMemoryVectorStore;
use super::qdrant::{QdrantConfig, QdrantVectorStore};
use crate::domain::knowledge_base::{CollectionSpec, VectorStore};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClient;

/// Which vector store implementation backs the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreBackend {
    #[default]
    Memory,
    Qdrant,
}

/// Vector store connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreConfig {
    #[serde(default)]
    pub backend: VectorStoreBackend,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6333
}

fn default_collection_name() -> String {
    "rag".to_string()
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            backend: VectorStoreBackend::default(),
            host: default_host(),
            port: default_port(),
            collection_name: default_collection_name(),
            api_key: None,
        }
    }
}

impl VectorStoreConfig {
    pub fn url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            format!("{}:{}", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

/// Factory for creating vector stores
#[derive(Debug)]
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    /// Build the configured store. Nothing is contacted until first use.
    pub fn create(
        config: &VectorStoreConfig,
        dimensions: usize,
        truncate_on_start: bool,
        http_client: HttpClient,
    ) -> Result<Arc<dyn VectorStore>, DomainError> {
        if config.collection_name.trim().is_empty() {
            return Err(DomainError::configuration(
                "vector_store.collection_name must not be empty",
            ));
        }

        let spec = CollectionSpec::new(&config.collection_name, dimensions);

        match config.backend {
            VectorStoreBackend::Memory => Ok(Arc::new(
                InMemoryVectorStore::new(spec).with_truncate_on_start(truncate_on_start),
            )),
            VectorStoreBackend::Qdrant => {
                if config.host.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "vector_store.host must not be empty",
                    ));
                }

                let mut qdrant = QdrantConfig::new(config.url(), spec)
                    .with_truncate_on_start(truncate_on_start);
                if let Some(ref key) = config.api_key {
                    qdrant = qdrant.with_api_key(key);
                }

                Ok(Arc::new(QdrantVectorStore::new(http_client, qdrant)))
            }
        }
    }
}
