//! Shape rule for OSS text-generation payloads
//!
//! OSS text endpoints expect `{"input_data": {"input_string": [...]}}`.

use serde_json::Value;

use super::{ShapeRule, Violation, MSG_INPUT_DATA_MISSING, MSG_INPUT_STRING_MISSING};
use crate::model::Capability;

/// Checks the `input_data.input_string` list expected by OSS text endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct OssTextRule;

impl OssTextRule {
    /// Create a new OSS-text shape rule
    pub fn new() -> Self {
        Self
    }
}

impl ShapeRule for OssTextRule {
    fn capability(&self) -> Capability {
        Capability::OssText
    }

    fn check(&self, payload: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        match payload.get("input_data") {
            None => violations.push(Violation::new(Capability::OssText, MSG_INPUT_DATA_MISSING)),
            Some(input_data) => match input_data.get("input_string") {
                None => violations.push(Violation::new(
                    Capability::OssText,
                    MSG_INPUT_STRING_MISSING,
                )),
                Some(input_string) if !input_string.is_array() => {
                    violations.push(Violation::new(
                        Capability::OssText,
                        format!(
                            "`input_string` field should be a list while got {}",
                            input_string
                        ),
                    ));
                }
                Some(_) => {}
            },
        }

        violations
    }
}
