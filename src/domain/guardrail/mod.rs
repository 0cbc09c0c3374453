//! Guardrail domain - safety screening of queries and answers
//!
//! A check starts `Pending` and settles exactly once on `Allowed` or
//! `Blocked`. Classifier output that cannot be understood blocks.

mod classifier;
mod filter;
mod policy;
mod state;
mod verdict;

pub use classifier::Guardrail;
pub use filter::DeliberationFilter;
pub use policy::{policy_prompt, REQUEST_POLICY, RESPONSE_POLICY};
pub use state::{GuardrailCheck, GuardrailStage, GuardrailState};
pub use verdict::{GuardrailDecision, GuardrailVerdict, VerdictFormat};

#[cfg(test)]
pub use classifier::mock::MockGuardrail;
