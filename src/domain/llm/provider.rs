use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for text generation backends (Ollama, OpenAI-compatible servers)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::llm::Message;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replies per model, falling back to a default reply
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        replies: HashMap<String, String>,
        default_reply: Option<String>,
        error: Option<String>,
        calls: Mutex<Vec<(String, LlmRequest)>>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                replies: HashMap::new(),
                default_reply: None,
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
            self.default_reply = Some(reply.into());
            self
        }

        pub fn with_model_reply(mut self, model: impl Into<String>, reply: impl Into<String>) -> Self {
            self.replies.insert(model.into(), reply.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> Vec<(String, LlmRequest)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn models_called(&self) -> Vec<String> {
            self.calls().into_iter().map(|(model, _)| model).collect()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), request));

            if let Some(ref error) = self.error {
                return Err(DomainError::generation(self.name, error));
            }

            let reply = self
                .replies
                .get(model)
                .or(self.default_reply.as_ref())
                .cloned()
                .ok_or_else(|| DomainError::generation(self.name, "No mock response configured"))?;

            Ok(LlmResponse::new(
                "mock-id".to_string(),
                model.to_string(),
                Message::assistant(reply),
            ))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
