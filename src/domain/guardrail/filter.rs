use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Strips model deliberation regions (`<think>...</think>` by default) from
/// an answer and trims the result.
#[derive(Debug, Clone)]
pub struct DeliberationFilter {
    pattern: Regex,
}

impl Default for DeliberationFilter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl DeliberationFilter {
    pub fn new(open: &str, close: &str) -> Result<Self, DomainError> {
        if open.is_empty() || close.is_empty() {
            return Err(DomainError::configuration(
                "deliberation tags must not be empty",
            ));
        }

        let pattern = format!("(?s){}.*?{}", regex::escape(open), regex::escape(close));
        let pattern = Regex::new(&pattern)
            .map_err(|e| DomainError::configuration(format!("invalid deliberation tags: {}", e)))?;

        Ok(Self { pattern })
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, "").trim().to_string()
    }
}
