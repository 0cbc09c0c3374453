//! Guardrail backed by a text-generation model acting as a safety classifier

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::guardrail::{
    policy_prompt, Guardrail, GuardrailStage, GuardrailVerdict, VerdictFormat,
};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

/// How verdicts are requested and where deliberation is stripped
#[derive(Debug, Clone, Deserialize)]
pub struct GuardrailConfig {
    #[serde(default)]
    pub verdict_format: VerdictFormat,
    #[serde(default = "default_open_tag")]
    pub deliberation_open: String,
    #[serde(default = "default_close_tag")]
    pub deliberation_close: String,
}

fn default_open_tag() -> String {
    "<think>".to_string()
}

fn default_close_tag() -> String {
    "</think>".to_string()
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            verdict_format: VerdictFormat::default(),
            deliberation_open: default_open_tag(),
            deliberation_close: default_close_tag(),
        }
    }
}

/// Classifies content with a dedicated guard model per stage.
///
/// Calls are deterministic (temperature 0). In sentinel format the raw
/// content is sent as is; in structured format it is wrapped in the written
/// policy for the stage.
#[derive(Debug)]
pub struct LlmGuardrail {
    provider: Arc<dyn LlmProvider>,
    request_model: String,
    response_model: String,
    format: VerdictFormat,
}

impl LlmGuardrail {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        request_model: impl Into<String>,
        response_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            request_model: request_model.into(),
            response_model: response_model.into(),
            format: VerdictFormat::default(),
        }
    }

    pub fn with_format(mut self, format: VerdictFormat) -> Self {
        self.format = format;
        self
    }

    fn model_for(&self, stage: GuardrailStage) -> &str {
        match stage {
            GuardrailStage::Request => &self.request_model,
            GuardrailStage::Response => &self.response_model,
        }
    }

    fn build_prompt(&self, stage: GuardrailStage, content: &str) -> String {
        match self.format {
            VerdictFormat::Sentinel => content.to_string(),
            VerdictFormat::Structured => policy_prompt(stage, content),
        }
    }
}

#[async_trait]
impl Guardrail for LlmGuardrail {
    async fn classify(
        &self,
        stage: GuardrailStage,
        content: &str,
    ) -> Result<GuardrailVerdict, DomainError> {
        let model = self.model_for(stage);
        let provider = self.provider.provider_name();

        let request = LlmRequest::builder()
            .user(self.build_prompt(stage, content))
            .temperature(0.0)
            .build();

        let response = self
            .provider
            .chat(model, request)
            .await
            .map_err(|e| e.into_generation(provider))?;

        let verdict = GuardrailVerdict::parse(self.format, response.content());

        if verdict.is_allowed() {
            debug!(stage = %stage, model = %model, "Guardrail allowed content");
        } else {
            warn!(
                stage = %stage,
                model = %model,
                reason = %verdict.rationale,
                "Guardrail blocked content"
            );
        }

        Ok(verdict)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
