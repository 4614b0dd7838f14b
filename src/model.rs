//! Model variant classification
//!
//! Classifies a target endpoint's expected payload shape from its
//! model-type string. A variant carries an explicit set of capability flags
//! rather than a type hierarchy: a single payload may need checking against
//! more than one capability, which favors flags over subclassing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload-shape capabilities an endpoint may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// OSS text-generation payloads (`input_data.input_string` list)
    OssText,
    /// Azure OpenAI chat/completion payloads (`prompt` or `messages`)
    AoaiChat,
    /// OSS vision payloads (`input_data.data`)
    VisionOss,
}

impl Capability {
    /// All capabilities, in the canonical validation order
    pub const ALL: [Capability; 3] = [
        Capability::OssText,
        Capability::AoaiChat,
        Capability::VisionOss,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::OssText => write!(f, "oss_text"),
            Capability::AoaiChat => write!(f, "aoai_chat"),
            Capability::VisionOss => write!(f, "vision_oss"),
        }
    }
}

/// Immutable classification of the target endpoint
///
/// Derived once from the configured model-type string; consumed by the
/// payload validator and the payload hasher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    model_type: String,
    capabilities: Vec<Capability>,
}

impl ModelVariant {
    /// Classify a model-type string into a variant descriptor
    ///
    /// Recognized types: `oss` (OSS text), `oai`/`aoai` (AOAI
    /// chat/completion), `vision_oss` (OSS vision). Unknown types carry no
    /// capabilities and validate vacuously.
    pub fn from_model_type(model_type: &str) -> Self {
        let normalized = model_type.trim().to_lowercase();
        let capabilities = match normalized.as_str() {
            "oss" => vec![Capability::OssText],
            "oai" | "aoai" => vec![Capability::AoaiChat],
            "vision_oss" => vec![Capability::VisionOss],
            _ => Vec::new(),
        };
        Self {
            model_type: normalized,
            capabilities,
        }
    }

    /// The normalized model-type string this variant was derived from
    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    /// Capability flags, in the canonical validation order
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Check whether a capability flag is set
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether the endpoint expects OSS text-generation payloads
    pub fn is_oss_text(&self) -> bool {
        self.has(Capability::OssText)
    }

    /// Whether the endpoint expects AOAI chat/completion payloads
    pub fn is_aoai_chat(&self) -> bool {
        self.has(Capability::AoaiChat)
    }

    /// Whether the endpoint expects OSS vision payloads
    pub fn is_vision_oss(&self) -> bool {
        self.has(Capability::VisionOss)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model_type)
    }
}
