//! Embedding request types

use serde::{Deserialize, Serialize};

/// Request to generate embeddings for a batch of texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Model to use for embedding
    model: String,
    /// Input texts, one vector is expected back per entry
    inputs: Vec<String>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            model: model.into(),
            inputs,
        }
    }

    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, vec![text.into()])
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request() {
        let request = EmbeddingRequest::single("nomic-embed-text", "test");

        assert_eq!(request.model(), "nomic-embed-text");
        assert_eq!(request.inputs(), &["test".to_string()]);
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_empty_request() {
        let request = EmbeddingRequest::new("nomic-embed-text", vec![]);
        assert!(request.is_empty());
    }
}
