//! Tolerant extraction of recommendations from a raw model reply.
//!
//! Accepted envelopes, checked in order (first match wins):
//! 1. a bare JSON array
//! 2. an object whose `recommendations` field is an array
//! 3. an object whose `data` field is an array
//! 4. any other object (yields an empty list, not an error)
//!
//! Elements are passed through without per-field checks.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::recommendation::Recommendation;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed inference output: {0}")]
    Malformed(String),
}

/// The reply shapes the parser recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyEnvelope {
    Bare(Vec<JsonValue>),
    Recommendations(Vec<JsonValue>),
    Data(Vec<JsonValue>),
    /// An object with neither list field.
    Other,
}

impl ReplyEnvelope {
    /// Classify an already-decoded JSON value.
    pub fn classify(value: JsonValue) -> Result<Self, ParseError> {
        match value {
            JsonValue::Array(items) => Ok(ReplyEnvelope::Bare(items)),
            JsonValue::Object(fields) => Ok(Self::classify_object(fields)),
            other => Err(ParseError::Malformed(format!(
                "expected a JSON array or object, found {}",
                kind_of(&other)
            ))),
        }
    }

    fn classify_object(mut fields: Map<String, JsonValue>) -> Self {
        if let Some(JsonValue::Array(items)) = fields.remove("recommendations") {
            return ReplyEnvelope::Recommendations(items);
        }
        if let Some(JsonValue::Array(items)) = fields.remove("data") {
            return ReplyEnvelope::Data(items);
        }
        ReplyEnvelope::Other
    }

    pub fn into_recommendations(self) -> Vec<Recommendation> {
        match self {
            ReplyEnvelope::Bare(items)
            | ReplyEnvelope::Recommendations(items)
            | ReplyEnvelope::Data(items) => items.into_iter().map(Recommendation::from_value).collect(),
            ReplyEnvelope::Other => Vec::new(),
        }
    }
}

/// Parse raw model text into an ordered list of recommendations.
pub fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, ParseError> {
    let value: JsonValue =
        serde_json::from_str(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;
    Ok(ReplyEnvelope::classify(value)?.into_recommendations())
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skus(recs: &[Recommendation]) -> Vec<Option<&str>> {
        recs.iter().map(|r| r.sku()).collect()
    }

    #[test]
    fn bare_array_is_used_directly() {
        let recs = parse_recommendations(r#"[{"sku":"A"}]"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("A")]);
    }

    #[test]
    fn recommendations_field_is_used() {
        let recs = parse_recommendations(r#"{"recommendations":[{"sku":"B"}]}"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("B")]);
    }

    #[test]
    fn data_field_is_used() {
        let recs = parse_recommendations(r#"{"data":[{"sku":"C"}]}"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("C")]);
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            parse_recommendations("not json"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn empty_object_is_an_empty_list() {
        assert_eq!(parse_recommendations("{}").unwrap(), Vec::new());
    }

    #[test]
    fn recommendations_takes_priority_over_data() {
        let recs =
            parse_recommendations(r#"{"data":[{"sku":"D"}],"recommendations":[{"sku":"R"}]}"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("R")]);
    }

    #[test]
    fn non_array_recommendations_falls_through_to_data() {
        let recs =
            parse_recommendations(r#"{"recommendations":{"sku":"X"},"data":[{"sku":"D"}]}"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("D")]);
    }

    #[test]
    fn object_with_non_array_fields_is_an_empty_list() {
        let recs = parse_recommendations(r#"{"recommendations":"none","data":null}"#).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn top_level_scalars_are_malformed() {
        for raw in ["null", "42", "\"text\"", "true"] {
            assert!(
                matches!(parse_recommendations(raw), Err(ParseError::Malformed(_))),
                "expected {raw} to be malformed"
            );
        }
    }

    #[test]
    fn elements_pass_through_without_schema_checks() {
        let raw = r#"[
            {"sku":"A","riskLevel":"extreme","suggestedReorderQuantity":"many"},
            {"recommendation":"no sku here"},
            "just a string"
        ]"#;
        let recs = parse_recommendations(raw).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].as_value()["riskLevel"], json!("extreme"));
        assert_eq!(recs[0].risk_level(), None);
        assert_eq!(recs[1].sku(), None);
        assert_eq!(recs[2].as_value(), &json!("just a string"));
    }

    #[test]
    fn element_order_is_preserved() {
        let recs = parse_recommendations(r#"{"data":[{"sku":"3"},{"sku":"1"},{"sku":"2"}]}"#).unwrap();
        assert_eq!(skus(&recs), vec![Some("3"), Some("1"), Some("2")]);
    }

    #[test]
    fn classify_reports_envelope_shape() {
        assert_eq!(
            ReplyEnvelope::classify(json!([])).unwrap(),
            ReplyEnvelope::Bare(vec![])
        );
        assert_eq!(
            ReplyEnvelope::classify(json!({"data": []})).unwrap(),
            ReplyEnvelope::Data(vec![])
        );
        assert_eq!(
            ReplyEnvelope::classify(json!({"other": [1]})).unwrap(),
            ReplyEnvelope::Other
        );
    }
}
