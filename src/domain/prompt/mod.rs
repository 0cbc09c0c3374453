//! Prompt templates with variable support, and the prompts the pipeline sends

mod rag;
mod template;

pub use rag::{RagPrompts, RAG_FALLBACK_TEMPLATE, RAG_TEMPLATE};
pub use template::{PromptTemplate, PromptVariable, TemplateError};
