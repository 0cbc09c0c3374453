//! Domain layer - Core pipeline types, provider traits and policies

pub mod answer;
pub mod deadline;
pub mod embedding;
pub mod error;
pub mod guardrail;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod prompt;

pub use answer::{GenerationMode, StagePlan};
pub use deadline::Deadline;
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::{DomainError, ErrorKind};
pub use guardrail::{
    DeliberationFilter, Guardrail, GuardrailCheck, GuardrailDecision, GuardrailStage,
    GuardrailState, GuardrailVerdict, VerdictFormat,
};
pub use ingestion::{
    ChunkingConfig, DocumentReport, DocumentSource, IngestionConfig, IngestionSummary, Page,
    PageAccumulator, PageExtractor, SourceDocument, TextSplitter, Tokenizer,
};
pub use knowledge_base::{
    CollectionSpec, DistanceMetric, KnowledgeItem, PointId, SearchConfig, SearchResult,
    UpsertResult, VectorStore,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole, Usage};
pub use prompt::{PromptTemplate, RagPrompts, TemplateError};
