//! Preparer façade
//!
//! Ties the renderer, validator, and correlator together behind one
//! configuration fixed at construction. Callers hand in one record at a time
//! and get back the rendered payload, its shape violations, and the matching
//! ground-truth row.

use serde_json::{Map, Value};
use tracing::debug;

use crate::correlator::{GroundTruthCorrelator, PayloadHasher};
use crate::engine::rules::Violation;
use crate::engine::PayloadValidator;
use crate::error::Result;
use crate::model::ModelVariant;
use crate::renderer::TemplateRenderer;

/// Configuration for an [`EndpointDataPreparer`]
#[derive(Debug, Clone, Default)]
pub struct PreparerConfig {
    /// Model type of the target endpoint (drives variant classification)
    pub model_type: String,
    /// Payload template with `###<name>` placeholders
    pub template: String,
    /// Record field holding the ground-truth label, if any
    pub label_field: Option<String>,
    /// Extra record fields copied verbatim into every ground-truth row
    pub extra_fields: Vec<String>,
}

impl PreparerConfig {
    /// Create a configuration from a model type and template
    pub fn new(model_type: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            model_type: model_type.into(),
            template: template.into(),
            label_field: None,
            extra_fields: Vec::new(),
        }
    }

    /// Set the label field
    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = Some(field.into());
        self
    }

    /// Set the extra columns from a comma-separated list
    pub fn with_extra_columns(mut self, columns: &str) -> Self {
        self.extra_fields = parse_column_list(columns);
        self
    }
}

/// Parse a comma-separated column list: entries trimmed, empties discarded
pub fn parse_column_list(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Everything produced for one record
#[derive(Debug, Clone)]
pub struct PreparedRecord {
    /// The rendered payload, ready for transmission
    pub payload: Value,
    /// Shape violations for the configured variant (empty = valid)
    pub violations: Vec<Violation>,
    /// The matching ground-truth row, keyed by `payload_id`
    pub ground_truth: Map<String, Value>,
}

/// Renders, validates, and correlates records against a fixed configuration
pub struct EndpointDataPreparer {
    variant: ModelVariant,
    renderer: TemplateRenderer,
    validator: PayloadValidator,
    correlator: GroundTruthCorrelator,
}

impl EndpointDataPreparer {
    /// Build a preparer from its configuration
    pub fn new(config: PreparerConfig) -> Self {
        let variant = ModelVariant::from_model_type(&config.model_type);
        debug!(
            model_type = variant.model_type(),
            capabilities = ?variant.capabilities(),
            "configured endpoint data preparer"
        );
        Self {
            renderer: TemplateRenderer::new(config.template),
            validator: PayloadValidator::new(variant.clone()),
            correlator: GroundTruthCorrelator::new(
                variant.clone(),
                config.label_field,
                config.extra_fields,
            ),
            variant,
        }
    }

    /// Replace the payload hasher used for ground-truth correlation
    pub fn with_hasher(mut self, hasher: Box<dyn PayloadHasher>) -> Self {
        self.correlator = self.correlator.with_hasher(hasher);
        self
    }

    /// The model variant derived from the configured model type
    pub fn variant(&self) -> &ModelVariant {
        &self.variant
    }

    /// Render the payload for one record
    pub fn render_payload(&self, record: &Map<String, Value>) -> Result<Value> {
        self.renderer.render(record)
    }

    /// Check a rendered payload against the variant's expected shape
    pub fn validate_payload(&self, payload: &Value) -> Vec<Violation> {
        self.validator.validate(payload)
    }

    /// Build the ground-truth row for a record and its rendered payload
    pub fn ground_truth(
        &self,
        record: &Map<String, Value>,
        rendered_payload: &Value,
    ) -> Result<Map<String, Value>> {
        self.correlator.correlate(record, rendered_payload)
    }

    /// Render, validate, and correlate one record in a single pass
    ///
    /// The ground truth is keyed by a hash of the exact payload rendered
    /// here, so the request and label streams stay joinable.
    pub fn prepare(&self, record: &Map<String, Value>) -> Result<PreparedRecord> {
        let payload = self.render_payload(record)?;
        let violations = self.validate_payload(&payload);
        let ground_truth = self.ground_truth(record, &payload)?;
        Ok(PreparedRecord {
            payload,
            violations,
            ground_truth,
        })
    }
}
