//! Written safety policies for the structured verdict format

use std::collections::HashMap;

use super::GuardrailStage;
use crate::domain::prompt::PromptTemplate;

pub const REQUEST_POLICY: &str = r#"You are a content-safety classifier for a question-answering service.
Decide whether the user input at the end of this message is ALLOW or BLOCK.

BLOCK when the input contains any of:
- attacks, slurs or dehumanising language aimed at a protected group
- threats, incitement or instructions to harm people, including self-harm
- sexual content of any kind
- requests for help with illegal activity, weapons manufacture or extremism
- repeated severe profanity aimed at someone
- unredacted personal data: e-mail, phone number, government ID, card
  number, exact postal address, biometric data
Otherwise ALLOW. When unsure, BLOCK.

Reply with this JSON object and nothing else:
{"decision": "ALLOW" or "BLOCK", "categories": [triggered groups], "confidence": 0.0-1.0, "brief_rationale": "at most 20 words"}

User input:
${var:user-input}"#;

pub const RESPONSE_POLICY: &str = r#"You are a safety classifier for answers produced by a language model.
Decide whether the draft answer at the end of this message is ALLOW or BLOCK.

BLOCK when the draft contains any of:
- attacks, slurs or dehumanising language aimed at a protected group
- praise of, instructions for, or graphic depiction of violence
- encouragement or instructions for suicide, self-harm or eating disorders
- sexual content involving minors, non-consent or pornography
- facilitation of crime (drugs, intrusion, weapons) or extremist support
- unredacted personal data that is real or plausibly real
- unverified harmful allegations about real people
- medical, legal or financial advice that could cause harm if followed
- sustained profanity or insults aimed at someone
Brief non-graphic historical or journalistic mentions, mild slang and
redacted examples are allowed.

Reply with this JSON object and nothing else:
{"decision": "ALLOW" or "BLOCK", "categories": [triggered groups], "confidence": 0.0-1.0, "brief_rationale": "at most 20 words"}

Draft answer:
${var:draft-output}"#;

/// Wrap `content` in the policy for `stage`
pub fn policy_prompt(stage: GuardrailStage, content: &str) -> String {
    let (policy, variable) = match stage {
        GuardrailStage::Request => (REQUEST_POLICY, "user-input"),
        GuardrailStage::Response => (RESPONSE_POLICY, "draft-output"),
    };

    let values = HashMap::from([(variable, content)]);

    // Both policies declare exactly one variable, which is always supplied
    PromptTemplate::parse(policy)
        .render(&values)
        .unwrap_or_else(|_| format!("{}\n\n{}", policy, content))
}
