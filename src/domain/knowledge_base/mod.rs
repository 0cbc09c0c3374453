//! Knowledge base domain - stored passages and vector search

mod collection;
mod item;
mod search;
mod store;

pub use collection::{CollectionSpec, DistanceMetric};
pub use item::{KnowledgeItem, PointId, SearchResult};
pub use search::SearchConfig;
pub use store::{UpsertResult, VectorStore};

#[cfg(test)]
pub use store::mock::MockVectorStore;
