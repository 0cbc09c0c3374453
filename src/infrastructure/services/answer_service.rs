//! Answer generation across the plain, RAG and full modes

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::RetrievalService;
use crate::domain::guardrail::{DeliberationFilter, Guardrail, GuardrailCheck, GuardrailStage};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::prompt::RagPrompts;
use crate::domain::{Deadline, DomainError, GenerationMode};
use crate::infrastructure::observability::{
    query_outcome, record_guardrail_decision, record_query,
};

/// Model selection and generation settings for queries
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub main_model_name: String,
    pub input_guardrail_model_name: String,
    pub output_guardrail_model_name: String,
    #[serde(default = "default_main_temperature")]
    pub main_temperature: f32,
    /// Screen the query before retrieval in the RAG mode as well
    #[serde(default)]
    pub rag_request_guardrail: bool,
}

fn default_main_temperature() -> f32 {
    0.7
}

impl QueryConfig {
    pub fn new(
        main_model_name: impl Into<String>,
        input_guardrail_model_name: impl Into<String>,
        output_guardrail_model_name: impl Into<String>,
    ) -> Self {
        Self {
            main_model_name: main_model_name.into(),
            input_guardrail_model_name: input_guardrail_model_name.into(),
            output_guardrail_model_name: output_guardrail_model_name.into(),
            main_temperature: default_main_temperature(),
            rag_request_guardrail: false,
        }
    }
}

/// Runs a query through the stages of its mode.
///
/// Every remote call is bounded by the caller's deadline. A refusal at
/// either guardrail surfaces as `PolicyRejection` carrying the stage's fixed
/// refusal text.
#[derive(Debug, Clone)]
pub struct AnswerService {
    provider: Arc<dyn LlmProvider>,
    guardrail: Arc<dyn Guardrail>,
    retriever: Arc<RetrievalService>,
    prompts: RagPrompts,
    filter: DeliberationFilter,
    config: QueryConfig,
}

impl AnswerService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        guardrail: Arc<dyn Guardrail>,
        retriever: Arc<RetrievalService>,
        config: QueryConfig,
    ) -> Self {
        Self {
            provider,
            guardrail,
            retriever,
            prompts: RagPrompts::default(),
            filter: DeliberationFilter::default(),
            config,
        }
    }

    pub fn with_filter(mut self, filter: DeliberationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Answer `query` in `mode`, recording the outcome
    #[instrument(skip(self, query, deadline))]
    pub async fn answer(
        &self,
        mode: GenerationMode,
        query: &str,
        deadline: &Deadline,
    ) -> Result<String, DomainError> {
        let started = Instant::now();

        let result = self.run(mode, query, deadline).await;

        let outcome = query_outcome(&result);
        record_query(mode, outcome, started.elapsed());
        info!(outcome, elapsed_ms = started.elapsed().as_millis() as u64, "Query finished");

        result
    }

    async fn run(
        &self,
        mode: GenerationMode,
        query: &str,
        deadline: &Deadline,
    ) -> Result<String, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("query must not be empty"));
        }

        let plan = mode.plan(self.config.rag_request_guardrail);

        let query = if plan.request_guardrail {
            self.screen(GuardrailStage::Request, query.to_string(), deadline)
                .await?
        } else {
            query.to_string()
        };

        let prompt = if plan.retrieval {
            let context = self.retriever.retrieve_context(&query, deadline).await?;
            debug!(context_chars = context.chars().count(), "Composing prompt");

            self.prompts
                .build(&context, &query)
                .map_err(|e| DomainError::internal(format!("prompt composition failed: {}", e)))?
        } else {
            query
        };

        let draft = self.generate(prompt, deadline).await?;

        let draft = if plan.response_guardrail {
            self.screen(GuardrailStage::Response, draft, deadline).await?
        } else {
            draft
        };

        Ok(self.filter.apply(&draft))
    }

    async fn generate(&self, prompt: String, deadline: &Deadline) -> Result<String, DomainError> {
        let provider = self.provider.provider_name();
        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.config.main_temperature)
            .build();

        let response = deadline
            .run(
                "generate answer",
                self.provider.chat(&self.config.main_model_name, request),
            )
            .await
            .map_err(|e| e.into_generation(provider))?;

        Ok(response.content().to_string())
    }

    async fn screen(
        &self,
        stage: GuardrailStage,
        content: String,
        deadline: &Deadline,
    ) -> Result<String, DomainError> {
        let verdict = deadline
            .run("guardrail", self.guardrail.classify(stage, &content))
            .await?;

        let mut check = GuardrailCheck::new(stage);
        check.resolve(&verdict)?;
        record_guardrail_decision(stage, verdict.is_allowed());

        check.into_result(content)
    }
}
