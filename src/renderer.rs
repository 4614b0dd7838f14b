//! Template renderer for batch inference payloads
//!
//! Turns one input record into one endpoint payload by substituting
//! `###<name>` placeholders in a user-supplied template with type-appropriate
//! encodings of the record's fields, then re-parsing the result as JSON.
//!
//! Rendering is an explicit two-phase pipeline: placeholder tokens are
//! extracted (and validated against the record) before any replacement
//! happens, so a template typo like `###<promt>` fails the whole render
//! instead of shipping the literal marker to the endpoint.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{PreparerError, Result};

/// Placeholder marker pattern. Wire-level contract with template authors:
/// the marker is `###<name>` where `name` is limited to `[A-Za-z0-9_ ]`.
pub const PLACEHOLDER_PATTERN: &str = "###<[A-Za-z0-9_ ]+>";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// Renders records into payloads against a template fixed at construction
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
    placeholders: Vec<String>,
}

impl TemplateRenderer {
    /// Create a renderer for the given template
    ///
    /// The placeholder scan happens once here; [`render`](Self::render) only
    /// checks presence and substitutes.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let placeholders = extract_placeholders(&template);
        debug!(
            placeholder_count = placeholders.len(),
            "compiled payload template"
        );
        Self {
            template,
            placeholders,
        }
    }

    /// The template string this renderer was built from
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Distinct placeholder names found in the template, in first-seen order
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Render a payload for one record
    ///
    /// Fails with [`PreparerError::PlaceholderMissing`] if any placeholder in
    /// the template has no matching record field (no partial substitution),
    /// and with [`PreparerError::MalformedPayload`] if the substituted text
    /// does not parse as JSON.
    pub fn render(&self, record: &Map<String, Value>) -> Result<Value> {
        let missing: Vec<String> = self
            .placeholders
            .iter()
            .filter(|name| !record.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PreparerError::PlaceholderMissing {
                placeholders: missing,
            });
        }

        let mut rendered = self.template.clone();
        for (key, value) in record {
            if self.placeholders.iter().any(|name| name == key) {
                let marker = format!("###<{}>", key);
                rendered = rendered.replace(&marker, &encode_value(value));
            }
        }

        serde_json::from_str(&rendered).map_err(|e| PreparerError::MalformedPayload {
            detail: e.to_string(),
            rendered,
        })
    }
}

/// Extract the distinct placeholder names from a template, in first-seen order
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    for m in placeholder_regex().find_iter(template) {
        // strip the "###<" prefix and ">" suffix
        let name = &m.as_str()[4..m.as_str().len() - 1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Encode a record field for textual substitution into a template
///
/// Strings insert their JSON-escaped content without the surrounding quotes,
/// since the template supplies its own quoting around the marker. Sequences
/// and mappings insert their full JSON encoding. Everything else (numbers,
/// booleans, null) inserts its plain textual representation.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(_) => {
            let quoted = value.to_string();
            quoted[1..quoted.len() - 1].to_string()
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record_from(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_extract_placeholders() {
        let names =
            extract_placeholders(r####"{"a": "###<first>", "b": "###<second name>", "c": "###<first>"}"####);
        assert_eq!(names, vec!["first".to_string(), "second name".to_string()]);
    }

    #[test]
    fn test_extract_ignores_malformed_markers() {
        let names = extract_placeholders(r####"{"a": "###<bad-char>", "b": "##<x>", "c": "###<ok>"}"####);
        assert_eq!(names, vec!["ok".to_string()]);
    }

    #[test]
    fn test_render_string_field_keeps_template_quoting() {
        let renderer = TemplateRenderer::new(r####"{"text": "###<prompt>"}"####);
        let record = record_from(json!({"prompt": "hi \"there\""}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"text": "hi \"there\""}));
    }

    #[test]
    fn test_render_list_field_supplies_own_encoding() {
        let renderer = TemplateRenderer::new(r#"{"input_data": {"input_string": ###<items>}}"#);
        let record = record_from(json!({"items": [1, 2, 3]}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"input_data": {"input_string": [1, 2, 3]}}));
    }

    #[test]
    fn test_render_mapping_field() {
        let renderer = TemplateRenderer::new(r#"{"params": ###<options>}"#);
        let record = record_from(json!({"options": {"max_tokens": 16, "echo": false}}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"params": {"max_tokens": 16, "echo": false}}));
    }

    #[test]
    fn test_render_scalar_fields_use_plain_text() {
        let renderer =
            TemplateRenderer::new(r#"{"n": ###<count>, "flag": ###<enabled>, "opt": ###<maybe>}"#);
        let record = record_from(json!({"count": 5, "enabled": true, "maybe": null}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"n": 5, "flag": true, "opt": null}));
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let renderer = TemplateRenderer::new(r####"{"a": "###<x>", "b": "###<x>"}"####);
        let record = record_from(json!({"x": "same"}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"a": "same", "b": "same"}));
    }

    #[test]
    fn test_render_ignores_extra_record_fields() {
        let renderer = TemplateRenderer::new(r####"{"text": "###<prompt>"}"####);
        let record = record_from(json!({"prompt": "hello", "unused": [1, 2]}));
        let payload = renderer.render(&record).unwrap();
        assert_eq!(payload, json!({"text": "hello"}));
    }

    #[test]
    fn test_render_fails_fast_on_missing_placeholder() {
        let renderer = TemplateRenderer::new(r####"{"a": "###<present>", "b": "###<typo>"}"####);
        let record = record_from(json!({"present": "x"}));
        let err = renderer.render(&record).unwrap_err();
        match err {
            PreparerError::PlaceholderMissing { placeholders } => {
                assert_eq!(placeholders, vec!["typo".to_string()]);
            }
            other => panic!("expected PlaceholderMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_render_fails_on_malformed_result() {
        // a bare string field in a position that needs quoting
        let renderer = TemplateRenderer::new(r#"{"text": ###<prompt>}"#);
        let record = record_from(json!({"prompt": "not quoted"}));
        let err = renderer.render(&record).unwrap_err();
        match err {
            PreparerError::MalformedPayload { rendered, .. } => {
                assert!(rendered.contains("not quoted"));
            }
            other => panic!("expected MalformedPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_render_without_placeholders_is_parse_only() {
        let renderer = TemplateRenderer::new(r#"{"static": 1}"#);
        let record = record_from(json!({"anything": "ignored"}));
        assert_eq!(renderer.render(&record).unwrap(), json!({"static": 1}));
    }

    #[test]
    fn test_placeholder_name_with_spaces() {
        let renderer = TemplateRenderer::new(r####"{"text": "###<my field>"}"####);
        let record = record_from(json!({"my field": "value"}));
        assert_eq!(
            renderer.render(&record).unwrap(),
            json!({"text": "value"})
        );
    }

    #[test]
    fn test_encode_value_string_strips_quotes_only() {
        assert_eq!(encode_value(&json!("plain")), "plain");
        assert_eq!(encode_value(&json!("with \"quotes\"")), r#"with \"quotes\""#);
        assert_eq!(encode_value(&json!("line\nbreak")), r#"line\nbreak"#);
    }

    #[test]
    fn test_encode_value_structures_and_scalars() {
        assert_eq!(encode_value(&json!([1, 2])), "[1,2]");
        assert_eq!(encode_value(&json!({"k": "v"})), r#"{"k":"v"}"#);
        assert_eq!(encode_value(&json!(3.5)), "3.5");
        assert_eq!(encode_value(&json!(false)), "false");
        assert_eq!(encode_value(&json!(null)), "null");
    }

    proptest! {
        // any string survives the escape-then-reparse round trip untouched
        #[test]
        fn prop_string_fields_round_trip(value in any::<String>()) {
            let renderer = TemplateRenderer::new(r####"{"text": "###<prompt>"}"####);
            let mut record = Map::new();
            record.insert("prompt".to_string(), Value::String(value.clone()));
            let payload = renderer.render(&record).unwrap();
            prop_assert_eq!(payload["text"].as_str().unwrap(), value.as_str());
        }

        // sequences substitute as their exact JSON encoding
        #[test]
        fn prop_sequence_fields_keep_json_encoding(items in proptest::collection::vec(any::<i64>(), 0..8)) {
            let renderer = TemplateRenderer::new(r#"{"input_data": {"input_string": ###<items>}}"#);
            let mut record = Map::new();
            record.insert("items".to_string(), json!(items.clone()));
            let payload = renderer.render(&record).unwrap();
            prop_assert_eq!(&payload["input_data"]["input_string"], &json!(items));
        }

        // a template naming an absent field never renders, whatever else is present
        #[test]
        fn prop_missing_placeholder_always_fails(value in "[a-zA-Z0-9 ]{0,16}") {
            let renderer = TemplateRenderer::new(r####"{"a": "###<present>", "b": "###<absent>"}"####);
            let mut record = Map::new();
            record.insert("present".to_string(), Value::String(value));
            let err = renderer.render(&record).unwrap_err();
            let is_missing = matches!(err, PreparerError::PlaceholderMissing { .. });
            prop_assert!(is_missing);
        }
    }
}
