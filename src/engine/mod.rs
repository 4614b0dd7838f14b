//! Payload validation engine
//!
//! Orchestrates shape-rule evaluation against rendered payloads. The engine
//! holds the rules for every known capability; at validation time only the
//! rules matching the configured model variant run, and their violations are
//! concatenated in the canonical capability order.

pub mod rules;

use serde_json::Value;
use tracing::debug;

use crate::model::ModelVariant;
use rules::aoai_chat::AoaiChatRule;
use rules::oss_text::OssTextRule;
use rules::vision_oss::VisionOssRule;
use rules::{BoxedShapeRule, Violation};

/// Validates rendered payloads against a model variant fixed at construction
pub struct PayloadValidator {
    variant: ModelVariant,
    rules: Vec<BoxedShapeRule>,
}

impl PayloadValidator {
    /// Create a validator for the given model variant with the default rules
    pub fn new(variant: ModelVariant) -> Self {
        let mut validator = Self {
            variant,
            rules: Vec::new(),
        };
        validator.register_default_rules();
        validator
    }

    /// Create a validator with no rules registered
    pub fn empty(variant: ModelVariant) -> Self {
        Self {
            variant,
            rules: Vec::new(),
        }
    }

    // Registration order fixes the order violations are reported in.
    fn register_default_rules(&mut self) {
        self.register(Box::new(OssTextRule::new()));
        self.register(Box::new(AoaiChatRule::new()));
        self.register(Box::new(VisionOssRule::new()));
    }

    /// Register a shape rule
    pub fn register(&mut self, rule: BoxedShapeRule) {
        self.rules.push(rule);
    }

    /// The model variant this validator checks against
    pub fn variant(&self) -> &ModelVariant {
        &self.variant
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[BoxedShapeRule] {
        &self.rules
    }

    /// Validate a rendered payload
    ///
    /// Pure and infallible: returns the violations from every rule whose
    /// capability is set on the variant, in registration order. An empty
    /// result means the payload is structurally acceptable. Variants with no
    /// capabilities validate vacuously.
    pub fn validate(&self, payload: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            if self.variant.has(rule.capability()) {
                violations.extend(rule.check(payload));
            }
        }
        debug!(
            model_type = self.variant.model_type(),
            violation_count = violations.len(),
            "validated payload shape"
        );
        violations
    }
}
