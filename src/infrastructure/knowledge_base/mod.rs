//! Vector store implementations

mod factory;
mod in_memory;
mod qdrant;

pub use factory::{VectorStoreBackend, VectorStoreConfig, VectorStoreFactory};
pub use in_memory::InMemoryVectorStore;
pub use qdrant::{QdrantConfig, QdrantVectorStore};
