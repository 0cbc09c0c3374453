//! RAG Gateway
//!
//! Retrieval-augmented question answering over a local document corpus:
//! - Token-window chunking and embedding of documents into a vector store
//! - Top-1 context retrieval for a query
//! - Plain, RAG and full answer modes with request and response guardrails

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::guardrail::DeliberationFilter;
use domain::ingestion::TextSplitter;
use domain::knowledge_base::VectorStore;
use infrastructure::{
    embedding::create_embedding_provider,
    guardrail::LlmGuardrail,
    ingestion::{IngestionPipeline, TokenSplitter},
    knowledge_base::VectorStoreFactory,
    llm::{HttpClient, LlmProviderFactory},
    services::{AnswerService, EmbeddingService, RetrievalService},
};
use tracing::info;

/// Handle to every long-lived component, built once at startup and passed
/// explicitly to whatever serves requests or runs ingestion.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn VectorStore>,
    pub embedder: Arc<EmbeddingService>,
    pub retriever: Arc<RetrievalService>,
    pub answers: Arc<AnswerService>,
    pub pipeline: Arc<IngestionPipeline>,
}

impl AppContext {
    /// Release the vector store connection
    pub async fn shutdown(&self) {
        if let Err(e) = self.store.close().await {
            tracing::warn!("Failed to close vector store: {}", e);
        }
    }
}

/// Build the context described by `config`.
///
/// The vector store collection is provisioned here; with
/// `truncate_on_start` an existing collection is dropped first. Failing to
/// provision is fatal.
pub async fn create_app_context(
    config: &AppConfig,
    truncate_on_start: bool,
) -> anyhow::Result<AppContext> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let http_client = HttpClient::with_timeout(config.timeouts.http())?;

    let llm_provider = LlmProviderFactory::create(&config.llm, http_client.clone())?;
    info!(
        provider = llm_provider.provider_name(),
        model = %config.query.main_model_name,
        "Generation provider ready"
    );

    let embedding_provider =
        create_embedding_provider(&config.embedding.provider, http_client.clone())?;
    let embedder = Arc::new(EmbeddingService::new(
        embedding_provider,
        &config.embedding.model_name,
        config.embedding.dimensions,
    ));

    let store = VectorStoreFactory::create(
        &config.vector_store,
        config.embedding.dimensions,
        truncate_on_start,
        http_client,
    )?;

    store.initialize().await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to provision collection '{}' on {} store: {}",
            config.vector_store.collection_name,
            store.store_type(),
            e
        )
    })?;
    info!(
        store = store.store_type(),
        collection = %config.vector_store.collection_name,
        truncated = truncate_on_start,
        "Vector store ready"
    );

    let retriever = Arc::new(RetrievalService::new(
        embedder.clone(),
        store.clone(),
        config.search.clone(),
    ));

    let guardrail = Arc::new(
        LlmGuardrail::new(
            llm_provider.clone(),
            &config.query.input_guardrail_model_name,
            &config.query.output_guardrail_model_name,
        )
        .with_format(config.guardrail.verdict_format),
    );

    let filter = DeliberationFilter::new(
        &config.guardrail.deliberation_open,
        &config.guardrail.deliberation_close,
    )?;

    let answers = Arc::new(
        AnswerService::new(llm_provider, guardrail, retriever.clone(), config.query.clone())
            .with_filter(filter),
    );

    let splitter: Arc<dyn TextSplitter> = Arc::new(TokenSplitter::with_word_tokens(
        config.ingestion.chunking.clone(),
    )?);

    let pipeline = Arc::new(IngestionPipeline::new(
        splitter,
        embedder.clone(),
        store.clone(),
        config.ingestion.flush_threshold,
        config.timeouts.request(),
    ));

    Ok(AppContext {
        config: Arc::new(config.clone()),
        store,
        embedder,
        retriever,
        answers,
        pipeline,
    })
}
