use std::fmt;

use serde::{Deserialize, Serialize};

use super::GuardrailVerdict;
use crate::domain::DomainError;

/// Where in the pipeline a guardrail runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardrailStage {
    /// Screens the inbound query
    Request,
    /// Screens the generated draft answer
    Response,
}

impl GuardrailStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }

    /// Fixed text shown to callers when this stage blocks
    pub fn refusal_message(&self) -> &'static str {
        match self {
            Self::Request => "cannot answer your query. It does not conform to our standards",
            Self::Response => "cannot answer your query. The response might not be good for you",
        }
    }
}

impl fmt::Display for GuardrailStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardrailState {
    Pending,
    Allowed,
    Blocked { reason: String },
}

/// One screening of one piece of content
#[derive(Debug)]
pub struct GuardrailCheck {
    stage: GuardrailStage,
    state: GuardrailState,
}

impl GuardrailCheck {
    pub fn new(stage: GuardrailStage) -> Self {
        Self {
            stage,
            state: GuardrailState::Pending,
        }
    }

    pub fn stage(&self) -> GuardrailStage {
        self.stage
    }

    pub fn state(&self) -> &GuardrailState {
        &self.state
    }

    /// Settle the check from a classifier verdict. Only a pending check can
    /// be settled.
    pub fn resolve(&mut self, verdict: &GuardrailVerdict) -> Result<&GuardrailState, DomainError> {
        if self.state != GuardrailState::Pending {
            return Err(DomainError::internal(format!(
                "{} guardrail already settled as {:?}",
                self.stage, self.state
            )));
        }

        self.state = if verdict.is_allowed() {
            GuardrailState::Allowed
        } else {
            GuardrailState::Blocked {
                reason: verdict.rationale.clone(),
            }
        };

        Ok(&self.state)
    }

    /// Pass `content` through when allowed; otherwise the stage's refusal.
    /// The classifier's reason never reaches the caller.
    pub fn into_result<T>(self, content: T) -> Result<T, DomainError> {
        match self.state {
            GuardrailState::Allowed => Ok(content),
            GuardrailState::Blocked { .. } => Err(DomainError::policy_rejection(
                self.stage,
                self.stage.refusal_message(),
            )),
            GuardrailState::Pending => Err(DomainError::internal(format!(
                "{} guardrail was never settled",
                self.stage
            ))),
        }
    }
}
