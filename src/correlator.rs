//! Ground-truth correlation
//!
//! Builds the labeled counterpart to a rendered payload. The two output
//! streams (request payloads and ground-truth rows) are joined downstream by
//! `payload_id`, a deterministic hash of the exact payload the renderer
//! produced for the same record.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{PreparerError, Result};
use crate::model::ModelVariant;

/// Reserved ground-truth key holding the payload hash
pub const PAYLOAD_ID_KEY: &str = "payload_id";

/// Reserved ground-truth key holding the labeled value
pub const LABEL_KEY: &str = "label";

/// Deterministic payload hashing seam
///
/// The correlator and any downstream scorer must agree on this function:
/// equal payloads under the same variant must hash to equal identifiers.
/// The trait exists so a scorer with its own identifier scheme can slot in.
pub trait PayloadHasher: Send + Sync {
    /// Map a rendered payload plus its model variant to a stable identifier
    fn hash(&self, payload: &Value, variant: &ModelVariant) -> String;
}

/// Default hasher: SHA-256 over the compact JSON encoding of the payload
/// and the model-type string, hex-encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PayloadHasher;

impl Sha256PayloadHasher {
    /// Create the default hasher
    pub fn new() -> Self {
        Self
    }
}

impl PayloadHasher for Sha256PayloadHasher {
    fn hash(&self, payload: &Value, variant: &ModelVariant) -> String {
        let mut hasher = Sha256::new();
        hasher.update(payload.to_string().as_bytes());
        hasher.update(variant.model_type().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Builds ground-truth rows for rendered payloads
///
/// Configuration (variant, label field, extra columns, hasher) is fixed at
/// construction; `correlate` is then pure per record.
pub struct GroundTruthCorrelator {
    variant: ModelVariant,
    label_field: Option<String>,
    extra_fields: Vec<String>,
    hasher: Box<dyn PayloadHasher>,
}

impl GroundTruthCorrelator {
    /// Create a correlator with the default SHA-256 hasher
    pub fn new(
        variant: ModelVariant,
        label_field: Option<String>,
        extra_fields: Vec<String>,
    ) -> Self {
        Self {
            variant,
            label_field,
            extra_fields,
            hasher: Box::new(Sha256PayloadHasher::new()),
        }
    }

    /// Replace the payload hasher
    pub fn with_hasher(mut self, hasher: Box<dyn PayloadHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// The extra columns copied into every ground-truth row
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    /// Compute the payload identifier for a rendered payload
    pub fn payload_id(&self, rendered_payload: &Value) -> String {
        self.hasher.hash(rendered_payload, &self.variant)
    }

    /// Build the ground-truth row for one record and its rendered payload
    ///
    /// The label defaults to an empty string when no label field is
    /// configured or the field is absent; a missing extra column is an error
    /// ([`PreparerError::MissingColumn`], naming the first offender).
    pub fn correlate(
        &self,
        record: &Map<String, Value>,
        rendered_payload: &Value,
    ) -> Result<Map<String, Value>> {
        let mut row = Map::new();
        row.insert(
            PAYLOAD_ID_KEY.to_string(),
            Value::String(self.payload_id(rendered_payload)),
        );

        let label = self
            .label_field
            .as_ref()
            .and_then(|field| record.get(field))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        row.insert(LABEL_KEY.to_string(), label);

        for field in &self.extra_fields {
            let value = record
                .get(field)
                .ok_or_else(|| PreparerError::MissingColumn(field.clone()))?;
            row.insert(field.clone(), value.clone());
        }

        Ok(row)
    }
}
