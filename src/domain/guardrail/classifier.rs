use async_trait::async_trait;
use std::fmt::Debug;

use super::{GuardrailStage, GuardrailVerdict};
use crate::domain::DomainError;

/// Safety classifier consulted before and after generation
#[async_trait]
pub trait Guardrail: Send + Sync + Debug {
    /// Classify `content` for `stage`. Transport failures are errors, never
    /// verdicts.
    async fn classify(
        &self,
        stage: GuardrailStage,
        content: &str,
    ) -> Result<GuardrailVerdict, DomainError>;

    fn name(&self) -> &'static str;
}
