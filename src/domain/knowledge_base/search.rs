use serde::Deserialize;

/// Parameters handed to the vector index on every search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Force exhaustive search instead of the approximate index
    pub exact: bool,
    /// Only consider already-indexed segments
    pub indexed_only: bool,
    /// Minimum similarity a hit must reach
    pub score_threshold: f32,
    /// Candidate list size for the approximate graph search (hnsw_ef)
    pub beam_width: u64,
    /// Maximum number of hits to request
    pub limit: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exact: false,
            indexed_only: false,
            score_threshold: 0.3,
            beam_width: 200,
            limit: 10,
        }
    }
}

impl SearchConfig {
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }
}
