//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `TextSplitter` and `Tokenizer` traits for token-bounded chunking
//! - `PageExtractor` and `DocumentSource` traits for reading a corpus page by page
//! - The page accumulation policy and report types for the ingestion pipeline

pub mod chunker;
pub mod parser;
pub mod pipeline;

// Re-export main types
pub use chunker::{ChunkingConfig, TextSplitter, Tokenizer};
pub use parser::{DocumentSource, Page, PageExtractor, SourceDocument};
pub use pipeline::{DocumentReport, IngestionConfig, IngestionSummary, PageAccumulator};

// Re-export mocks for testing
#[cfg(test)]
pub use chunker::mock::MockTextSplitter;
#[cfg(test)]
pub use parser::mock::MemorySource;
