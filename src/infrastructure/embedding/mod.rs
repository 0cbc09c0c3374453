//! Embedding provider implementations

mod ollama;
mod openai;

use std::sync::Arc;

pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};

use super::llm::{LlmProviderConfig, ProviderKind};
use crate::domain::{DomainError, EmbeddingProvider};

/// Build the embedding backend described by `config`
pub fn create_embedding_provider(
    config: &LlmProviderConfig,
    http_client: HttpClient,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    if config.base_url.trim().is_empty() {
        return Err(DomainError::configuration(
            "embedding.base_url must not be empty",
        ));
    }

    match config.provider {
        ProviderKind::Ollama => Ok(Arc::new(OllamaEmbeddingProvider::with_base_url(
            http_client,
            &config.base_url,
        ))),
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
            http_client,
            config.api_key.as_deref(),
            &config.base_url,
        ))),
    }
}
