//! Shape rules for endpoint payloads
//!
//! Each rule checks a rendered payload against the structure one endpoint
//! capability expects and reports violations as data. Violations are never
//! errors: the caller decides whether a non-empty result is fatal.

pub mod aoai_chat;
pub mod oss_text;
pub mod vision_oss;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::model::Capability;

/// Violation text shared with downstream tooling. The exact wording is a
/// wire-level contract; do not edit without coordinating with consumers.
pub const MSG_INPUT_DATA_MISSING: &str = "`input_data` should be presented in the payload json.";
pub const MSG_INPUT_STRING_MISSING: &str =
    "`input_string` should be presented in the `input_data` fields of payload json.";
pub const MSG_DATA_MISSING: &str =
    "`data` should be presented in the `input_data` fields of payload json.";
pub const MSG_PROMPT_NOT_STRING: &str = "`prompt` should be of type string.";
pub const MSG_MESSAGES_NOT_LIST: &str = "`messages` field in the payload should be a list.";
pub const MSG_PROMPT_OR_MESSAGES_MISSING: &str =
    "`messages` or `prompt` should be present in the payload json.";

/// A single payload-shape violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The capability whose shape check produced this violation
    pub capability: Capability,
    /// Human-readable description of the structural problem
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(capability: Capability, message: impl Into<String>) -> Self {
        Self {
            capability,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.capability, self.message)
    }
}

/// Trait for payload shape rules
///
/// Rules are deterministic, pure checks over an already-rendered payload.
/// They never fail and never modify the payload; each rule covers exactly
/// one endpoint capability.
pub trait ShapeRule: Send + Sync {
    /// The capability whose payload shape this rule checks
    fn capability(&self) -> Capability;

    /// Check a payload, returning a list of violations (may be empty)
    fn check(&self, payload: &Value) -> Vec<Violation>;
}

/// A boxed rule for dynamic dispatch
pub type BoxedShapeRule = Box<dyn ShapeRule>;
