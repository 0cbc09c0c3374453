//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding backends (Ollama, OpenAI-compatible servers)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate one embedding per input, in input order
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Deterministic embeddings derived from the input text
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        drop_last: bool,
        error: Option<String>,
        calls: Mutex<Vec<EmbeddingRequest>>,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                drop_last: false,
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Return one vector fewer than requested
        pub fn dropping_last(mut self) -> Self {
            self.drop_last = true;
            self
        }

        pub fn calls(&self) -> Vec<EmbeddingRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn vector_for(&self, text: &str) -> Vec<f32> {
            let mut state = text
                .bytes()
                .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
                    (acc ^ b as u64).wrapping_mul(0x0100_0000_01b3)
                });

            (0..self.dimensions)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    ((state % 2000) as f32 / 1000.0) - 1.0
                })
                .collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.lock().unwrap().push(request.clone());

            if let Some(ref error) = self.error {
                return Err(DomainError::embedding(self.name, error));
            }

            let mut vectors: Vec<Vec<f32>> = request
                .inputs()
                .iter()
                .map(|text| self.vector_for(text))
                .collect();

            if self.drop_last {
                vectors.pop();
            }

            Ok(EmbeddingResponse::new(request.model().to_string(), vectors))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new("test", 16);
            let request = EmbeddingRequest::new("mock", vec!["Hello".into(), "World".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.len(), 2);
            assert!(response.vectors().iter().all(|v| v.len() == 16));
        }

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 16);

            let first = provider.embed(EmbeddingRequest::single("mock", "Hello")).await.unwrap();
            let second = provider.embed(EmbeddingRequest::single("mock", "Hello")).await.unwrap();
            let other = provider.embed(EmbeddingRequest::single("mock", "Bye")).await.unwrap();

            assert_eq!(first.vectors(), second.vectors());
            assert_ne!(first.vectors(), other.vectors());
        }
    }
}
