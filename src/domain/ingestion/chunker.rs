//! Chunking traits and configuration

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Token budget for each chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    pub chunk_size: usize,
    /// Tokens repeated from the end of the previous chunk
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::chunking("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::chunking(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }

    /// Tokens each chunk advances past the previous one
    pub fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            chunk_overlap: 100,
        }
    }
}

/// Splits text into tokens. Concatenating the tokens must reproduce the input.
pub trait Tokenizer: Send + Sync + Debug {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, DomainError>;

    fn name(&self) -> &'static str;
}

/// Splits text into token-bounded passages
pub trait TextSplitter: Send + Sync + Debug {
    /// Split `text` into passages. Empty or whitespace-only input yields none.
    fn split(&self, text: &str) -> Result<Vec<String>, DomainError>;

    /// Get the splitter name
    fn name(&self) -> &'static str;
}
