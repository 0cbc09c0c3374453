//! Infrastructure services

mod answer_service;
mod embedding_service;
mod retrieval_service;

pub use answer_service::{AnswerService, QueryConfig};
pub use embedding_service::EmbeddingService;
pub use retrieval_service::RetrievalService;
