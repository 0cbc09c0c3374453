//! Prompt composition for retrieval-augmented answers

use std::collections::HashMap;

use super::template::{PromptTemplate, TemplateError};

/// Used when retrieval produced a passage
pub const RAG_TEMPLATE: &str = "You are a helpful assistant.
Answer the user using only the context below.

Context:
${var:context}

Question: ${var:question}";

/// Used when retrieval found nothing relevant
pub const RAG_FALLBACK_TEMPLATE: &str = "You are a helpful assistant.
Answer the following question:

Question: ${var:question}";

/// The pair of prompts used by the answer generator
#[derive(Debug, Clone)]
pub struct RagPrompts {
    with_context: PromptTemplate,
    without_context: PromptTemplate,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self::new(RAG_TEMPLATE, RAG_FALLBACK_TEMPLATE)
    }
}

impl RagPrompts {
    pub fn new(with_context: &str, without_context: &str) -> Self {
        Self {
            with_context: PromptTemplate::parse(with_context),
            without_context: PromptTemplate::parse(without_context),
        }
    }

    /// Compose the generation prompt. An empty context selects the fallback
    /// template, which carries no context section.
    pub fn build(&self, context: &str, question: &str) -> Result<String, TemplateError> {
        if context.is_empty() {
            return self
                .without_context
                .render(&HashMap::from([("question", question)]));
        }

        self.with_context
            .render(&HashMap::from([("context", context), ("question", question)]))
    }
}
