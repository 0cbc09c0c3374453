//! Guardrail implementations

mod llm_guardrail;

pub use llm_guardrail::{GuardrailConfig, LlmGuardrail};
