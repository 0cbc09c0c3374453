use std::time::Duration;

use serde::Deserialize;

use crate::domain::ingestion::IngestionConfig;
use crate::domain::knowledge_base::SearchConfig;
use crate::infrastructure::guardrail::GuardrailConfig;
use crate::infrastructure::knowledge_base::VectorStoreConfig;
use crate::infrastructure::llm::LlmProviderConfig;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::services::QueryConfig;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Generation backend
    #[serde(default)]
    pub llm: LlmProviderConfig,
    pub query: QueryConfig,
    #[serde(default)]
    pub guardrail: GuardrailConfig,
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Embedding backend and the vector size it produces
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    #[serde(flatten)]
    pub provider: LlmProviderConfig,
    pub model_name: String,
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

fn default_dimensions() -> usize {
    768
}

/// Time limits for remote work
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    /// Budget for a whole query, shared by all its remote calls
    #[serde(default = "default_request_secs")]
    pub request_secs: u64,
    /// Per HTTP call limit on the shared client
    #[serde(default = "default_http_secs")]
    pub http_secs: u64,
}

fn default_request_secs() -> u64 {
    120
}

fn default_http_secs() -> u64 {
    60
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn http(&self) -> Duration {
        Duration::from_secs(self.http_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: default_request_secs(),
            http_secs: default_http_secs(),
        }
    }
}

impl AppConfig {
    /// Load `path` (required), then `config/local` if present, then
    /// `APP__SECTION__KEY` environment overrides
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(true))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("query.main_model_name", &self.query.main_model_name),
            (
                "query.input_guardrail_model_name",
                &self.query.input_guardrail_model_name,
            ),
            (
                "query.output_guardrail_model_name",
                &self.query.output_guardrail_model_name,
            ),
            ("embedding.model_name", &self.embedding.model_name),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }

        if self.embedding.dimensions == 0 {
            return Err("embedding.dimensions must be greater than 0".to_string());
        }

        self.ingestion
            .chunking
            .validate()
            .map_err(|e| format!("ingestion.chunking: {}", e))?;

        if self.ingestion.flush_threshold == 0 {
            return Err("ingestion.flush_threshold must be greater than 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.search.score_threshold) {
            return Err("search.score_threshold must be between 0 and 1".to_string());
        }

        if self.timeouts.request_secs == 0 || self.timeouts.http_secs == 0 {
            return Err("timeouts must be greater than 0".to_string());
        }

        Ok(())
    }
}
