use thiserror::Error;

use super::guardrail::GuardrailStage;

/// Coarse classification used by transports to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Embedding,
    Generation,
    StoreUnavailable,
    PolicyRejection,
    Chunking,
    Timeout,
    Configuration,
    Transport,
    Internal,
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Embedding error: {provider} - {message}")]
    Embedding { provider: String, message: String },

    #[error("Generation error: {provider} - {message}")]
    Generation { provider: String, message: String },

    #[error("Vector store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Rejected at {stage} stage: {message}")]
    PolicyRejection { stage: GuardrailStage, message: String },

    #[error("Chunking error: {message}")]
    Chunking { message: String },

    #[error("Timed out: {operation}")]
    Timeout { operation: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn embedding(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Embedding {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn generation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn policy_rejection(stage: GuardrailStage, message: impl Into<String>) -> Self {
        Self::PolicyRejection {
            stage,
            message: message.into(),
        }
    }

    pub fn chunking(message: impl Into<String>) -> Self {
        Self::Chunking {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Embedding { .. } => ErrorKind::Embedding,
            Self::Generation { .. } => ErrorKind::Generation,
            Self::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            Self::PolicyRejection { .. } => ErrorKind::PolicyRejection,
            Self::Chunking { .. } => ErrorKind::Chunking,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Reclassify a raw transport failure as an embedding failure.
    /// Errors that already carry a kind are returned unchanged.
    pub fn into_embedding(self, provider: &str) -> Self {
        match self {
            Self::Transport { message } => Self::embedding(provider, message),
            other => other,
        }
    }

    /// Reclassify a raw transport failure as a generation failure.
    pub fn into_generation(self, provider: &str) -> Self {
        match self {
            Self::Transport { message } => Self::generation(provider, message),
            other => other,
        }
    }

    /// Reclassify a raw transport failure as the store being unavailable.
    pub fn into_store(self) -> Self {
        match self {
            Self::Transport { message } => Self::store_unavailable(message),
            other => other,
        }
    }
}
