use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuardrailDecision {
    Allow,
    Block,
}

/// How the classifier is prompted and how its output is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictFormat {
    /// Raw content in, a bare `safe` out means allowed (Llama Guard style)
    #[default]
    Sentinel,
    /// Content wrapped in the written policy, JSON verdict out
    Structured,
}

/// Classifier output in structured form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    pub decision: GuardrailDecision,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub rationale: String,
}

/// Wire shape the structured policy asks the classifier for
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVerdict {
    decision: String,
    categories: Vec<String>,
    confidence: f32,
    brief_rationale: String,
}

impl GuardrailVerdict {
    pub fn allow() -> Self {
        Self {
            decision: GuardrailDecision::Allow,
            categories: Vec::new(),
            confidence: None,
            rationale: String::new(),
        }
    }

    pub fn block(rationale: impl Into<String>) -> Self {
        Self {
            decision: GuardrailDecision::Block,
            categories: Vec::new(),
            confidence: None,
            rationale: rationale.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.decision == GuardrailDecision::Allow
    }

    /// Read classifier output according to `format`
    pub fn parse(format: VerdictFormat, output: &str) -> Self {
        match format {
            VerdictFormat::Sentinel => Self::from_sentinel(output),
            VerdictFormat::Structured => Self::from_structured(output),
        }
    }

    /// Exactly `safe` allows; anything else blocks with the output as reason
    pub fn from_sentinel(output: &str) -> Self {
        if output == "safe" {
            return Self::allow();
        }

        Self::block(output)
    }

    /// Only a complete, well-formed verdict whose decision is ALLOW allows
    pub fn from_structured(output: &str) -> Self {
        let json = extract_json(output).unwrap_or(output);

        let raw: RawVerdict = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Unreadable guardrail verdict, blocking: {}", e);
                return Self::block(format!("malformed verdict: {}", e));
            }
        };

        let decision = match raw.decision.trim() {
            "ALLOW" => GuardrailDecision::Allow,
            "BLOCK" => GuardrailDecision::Block,
            other => {
                warn!("Unknown guardrail decision '{}', blocking", other);
                return Self::block(format!("unknown decision: {}", other));
            }
        };

        if !(0.0..=1.0).contains(&raw.confidence) {
            return Self::block(format!("confidence out of range: {}", raw.confidence));
        }

        Self {
            decision,
            categories: raw.categories,
            confidence: Some(raw.confidence),
            rationale: raw.brief_rationale,
        }
    }
}

/// Extract JSON object from a string (handles markdown code fences)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_safe_allows() {
        assert!(GuardrailVerdict::from_sentinel("safe").is_allowed());
    }

    #[test]
    fn test_sentinel_anything_else_blocks() {
        for output in ["", "unsafe\nS1", "Safe", "safe ", "I think this is safe"] {
            let verdict = GuardrailVerdict::from_sentinel(output);
            assert!(!verdict.is_allowed(), "{:?} should block", output);
            assert_eq!(verdict.rationale, output);
        }
    }

    #[test]
    fn test_structured_allow() {
        let output = r#"```json
{"decision": "ALLOW", "categories": [], "confidence": 0.93, "brief_rationale": "harmless"}
```"#;

        let verdict = GuardrailVerdict::from_structured(output);

        assert!(verdict.is_allowed());
        assert_eq!(verdict.confidence, Some(0.93));
        assert_eq!(verdict.rationale, "harmless");
    }

    #[test]
    fn test_structured_block_keeps_categories() {
        let output = r#"{"decision": "BLOCK", "categories": ["PII"], "confidence": 0.8, "brief_rationale": "phone number"}"#;

        let verdict = GuardrailVerdict::from_structured(output);

        assert_eq!(verdict.decision, GuardrailDecision::Block);
        assert_eq!(verdict.categories, vec!["PII".to_string()]);
    }

    #[test]
    fn test_structured_fails_closed() {
        let outputs = [
            "ALLOW",
            "",
            r#"{"decision": "ALLOW"}"#,
            r#"{"decision": "MAYBE", "categories": [], "confidence": 0.5, "brief_rationale": ""}"#,
            r#"{"decision": "ALLOW", "categories": [], "confidence": 7, "brief_rationale": ""}"#,
            r#"{"decision": "ALLOW", "categories": [], "confidence": 0.5, "brief_rationale": "", "extra": 1}"#,
        ];

        for output in outputs {
            assert!(
                !GuardrailVerdict::from_structured(output).is_allowed(),
                "{:?} should block",
                output
            );
        }
    }

    #[test]
    fn test_parse_dispatches_on_format() {
        assert!(GuardrailVerdict::parse(VerdictFormat::Sentinel, "safe").is_allowed());
        assert!(!GuardrailVerdict::parse(VerdictFormat::Structured, "safe").is_allowed());
    }
}
