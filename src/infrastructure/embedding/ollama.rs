//! Ollama embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_OLLAMA_BASE_URL;

/// Ollama embedding provider (`POST /api/embed`, batch input)
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn embed_url(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let body = serde_json::json!({
            "model": request.model(),
            "input": request.inputs(),
        });

        let json = self
            .client
            .post_json(&self.embed_url(), vec![], &body)
            .await
            .map_err(|e| e.into_embedding("ollama"))?;

        let response: OllamaEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::embedding("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        Ok(EmbeddingResponse::new(
            response.model.unwrap_or_else(|| request.model().to_string()),
            response.embeddings,
        ))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    model: Option<String>,
    embeddings: Vec<Vec<f32>>,
}
