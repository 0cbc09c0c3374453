use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// How a query is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Screen the query, generate directly, screen the answer
    Plain,
    /// Retrieve context, generate, screen the answer
    #[default]
    Rag,
    /// Screen the query, retrieve context, generate, screen the answer
    Full,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Rag => "rag",
            Self::Full => "full",
        }
    }

    /// Stages this mode runs. `rag_request_guardrail` turns query screening on
    /// for the RAG mode; the other modes ignore it.
    pub fn plan(&self, rag_request_guardrail: bool) -> StagePlan {
        match self {
            Self::Plain => StagePlan {
                request_guardrail: true,
                retrieval: false,
                response_guardrail: true,
            },
            Self::Rag => StagePlan {
                request_guardrail: rag_request_guardrail,
                retrieval: true,
                response_guardrail: true,
            },
            Self::Full => StagePlan {
                request_guardrail: true,
                retrieval: true,
                response_guardrail: true,
            },
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "rag" => Ok(Self::Rag),
            "full" => Ok(Self::Full),
            other => Err(DomainError::validation(format!(
                "unknown generation mode '{}', expected plain, rag or full",
                other
            ))),
        }
    }
}

/// Which optional stages surround generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePlan {
    pub request_guardrail: bool,
    pub retrieval: bool,
    pub response_guardrail: bool,
}
