//! Shape rule for OSS vision payloads
//!
//! Vision endpoints expect `{"input_data": {"data": ...}}`. The two key
//! checks are independent: a payload with no `input_data` at all reports
//! both the missing container and the missing `data` field, and the nested
//! lookup never aborts the check.

use serde_json::Value;

use super::{ShapeRule, Violation, MSG_DATA_MISSING, MSG_INPUT_DATA_MISSING};
use crate::model::Capability;

/// Checks the `input_data.data` field expected by OSS vision endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionOssRule;

impl VisionOssRule {
    /// Create a new vision-OSS shape rule
    pub fn new() -> Self {
        Self
    }
}

impl ShapeRule for VisionOssRule {
    fn capability(&self) -> Capability {
        Capability::VisionOss
    }

    fn check(&self, payload: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        let input_data = payload.get("input_data");
        if input_data.is_none() {
            violations.push(Violation::new(Capability::VisionOss, MSG_INPUT_DATA_MISSING));
        }
        if input_data.and_then(|d| d.get("data")).is_none() {
            violations.push(Violation::new(Capability::VisionOss, MSG_DATA_MISSING));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_payload_passes() {
        let rule = VisionOssRule::new();
        let payload = json!({"input_data": {"data": ["base64..."]}});
        assert!(rule.check(&payload).is_empty());
    }

    #[test]
    fn test_missing_input_data_reports_both_violations() {
        let rule = VisionOssRule::new();
        let violations = rule.check(&json!({"other": 1}));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, MSG_INPUT_DATA_MISSING);
        assert_eq!(violations[1].message, MSG_DATA_MISSING);
    }

    #[test]
    fn test_missing_data_field() {
        let rule = VisionOssRule::new();
        let violations = rule.check(&json!({"input_data": {"columns": []}}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, MSG_DATA_MISSING);
    }
}
