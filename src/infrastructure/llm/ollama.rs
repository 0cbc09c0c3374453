use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::{DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama chat provider (`POST /api/chat`, non-streaming)
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let mut options = serde_json::Map::new();

        if let Some(temp) = request.temperature {
            options.insert("temperature".to_string(), serde_json::json!(temp));
        }

        serde_json::json!({
            "model": model,
            "messages": request.messages,
            "stream": false,
            "options": options,
        })
    }

    fn parse_response(&self, model: &str, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OllamaChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::generation("ollama", format!("Failed to parse response: {}", e))
        })?;

        let id = response.created_at.unwrap_or_else(|| "ollama".to_string());
        let mut llm_response = LlmResponse::new(
            id,
            response.model.unwrap_or_else(|| model.to_string()),
            Message::assistant(response.message.content),
        );

        if let Some(reason) = response.done_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::from_provider(&reason));
        }

        if let (Some(prompt), Some(completion)) = (response.prompt_eval_count, response.eval_count) {
            llm_response = llm_response.with_usage(Usage::new(prompt, completion));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let body = self.build_request(model, &request);

        debug!(model = %model, "Sending chat request to Ollama");

        let response = self
            .client
            .post_json(&self.chat_url(), vec![], &body)
            .await
            .map_err(|e| e.into_generation("ollama"))?;

        self.parse_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    model: Option<String>,
    created_at: Option<String>,
    message: OllamaMessage,
    done_reason: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}
