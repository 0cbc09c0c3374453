//! Document ingestion infrastructure
//!
//! Page extraction, token chunking, the corpus walker and the pipeline that
//! feeds the vector store.

pub mod chunkers;
pub mod parsers;
pub mod pipeline;
pub mod sources;

pub use chunkers::{TokenSplitter, UnicodeWordTokenizer};
pub use parsers::{MarkdownExtractor, PdfExtractor, PlainTextExtractor};
pub use pipeline::IngestionPipeline;
pub use sources::DirectorySource;
