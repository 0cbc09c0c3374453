use std::sync::Arc;

use serde::Deserialize;

use super::http_client::HttpClient;
use super::{OllamaProvider, OpenAiProvider};
use crate::domain::{DomainError, LlmProvider};

/// Which wire protocol a generation or embedding backend speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Ollama,
    OpenAi,
}

/// Connection settings shared by the LLM and embedding factories
#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    super::ollama::DEFAULT_OLLAMA_BASE_URL.to_string()
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub fn create(
        config: &LlmProviderConfig,
        http_client: HttpClient,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        if config.base_url.trim().is_empty() {
            return Err(DomainError::configuration("llm.base_url must not be empty"));
        }

        match config.provider {
            ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::with_base_url(
                http_client,
                &config.base_url,
            ))),
            ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::with_base_url(
                http_client,
                config.api_key.as_deref(),
                &config.base_url,
            ))),
        }
    }
}
