//! LLM provider implementations

mod factory;
mod http_client;
mod ollama;
mod openai;

pub use factory::{LlmProviderConfig, LlmProviderFactory, ProviderKind};
pub use http_client::{HttpClient, HttpClientTrait};
pub use ollama::{OllamaProvider, DEFAULT_OLLAMA_BASE_URL};
pub use openai::OpenAiProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
