//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Rendering is a single pass, so values are never themselves scanned for
//! variables. Retrieved passages and user queries can contain `${var:...}`
//! text safely.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let Some(name) = cap.get(1).map(|m| m.as_str().to_string()) else {
                continue;
            };

            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            let name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();

            match values.get(name) {
                Some(value) => value.to_string(),
                None => cap.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_parse_variables_with_and_without_default() {
        let template = PromptTemplate::parse("${var:name} is ${var:mood:fine}, ${var:name}");

        assert_eq!(template.variables().len(), 2);
        assert!(template.variables()[0].is_required());
        assert_eq!(template.variables()[1].default.as_deref(), Some("fine"));
    }

    #[test]
    fn test_render_required_variable() {
        let template = PromptTemplate::parse("Hello, ${var:name}!");
        let values = HashMap::from([("name", "World")]);

        assert_eq!(template.render(&values).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_render_missing_required_variable() {
        let template = PromptTemplate::parse("Hello, ${var:name}!");

        let result = template.render(&HashMap::new());

        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "name".to_string()
            })
        );
    }

    #[test]
    fn test_render_uses_default() {
        let template = PromptTemplate::parse("Mood: ${var:mood:fine}");

        assert_eq!(template.render(&HashMap::new()).unwrap(), "Mood: fine");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = PromptTemplate::parse("C: ${var:context} Q: ${var:question}");
        let values = HashMap::from([("context", "${var:question}"), ("question", "why?")]);

        assert_eq!(
            template.render(&values).unwrap(),
            "C: ${var:question} Q: why?"
        );
    }
}
