use std::fmt;

use serde::{Deserialize, Serialize};

/// One embedded passage together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub embedding: Vec<f32>,
    /// Path of the source document; empty for query-side items
    pub source_document: String,
    pub chunk: String,
}

impl KnowledgeItem {
    pub fn new(
        embedding: Vec<f32>,
        source_document: impl Into<String>,
        chunk: impl Into<String>,
    ) -> Self {
        Self {
            embedding,
            source_document: source_document.into(),
            chunk: chunk.into(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

/// Identifier assigned by the store to a written point
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(u64),
    Uuid(String),
}

impl PointId {
    pub fn random() -> Self {
        Self::Uuid(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Uuid(s) => write!(f, "{}", s),
        }
    }
}

/// A search hit; hits are always handed out in descending score order
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: PointId,
    pub score: f32,
    pub item: KnowledgeItem,
}

impl SearchResult {
    /// Sort hits by descending score, dropping any below `threshold`
    pub fn rank(mut results: Vec<SearchResult>, threshold: f32) -> Vec<SearchResult> {
        results.retain(|r| r.score >= threshold);
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results
    }
}
