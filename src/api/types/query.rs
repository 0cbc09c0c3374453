//! Query endpoint body

use serde::Deserialize;

/// Body of `POST /query`, `/ragquery` and `/fullquery`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    #[serde(alias = "Query")]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_spellings() {
        let lower: QueryRequest = serde_json::from_str(r#"{"query": "why?"}"#).unwrap();
        let upper: QueryRequest = serde_json::from_str(r#"{"Query": "why?"}"#).unwrap();

        assert_eq!(lower.query, "why?");
        assert_eq!(upper.query, "why?");
    }

    #[test]
    fn test_missing_field_fails() {
        assert!(serde_json::from_str::<QueryRequest>(r#"{"question": "why?"}"#).is_err());
    }
}
