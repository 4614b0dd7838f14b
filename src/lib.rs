//! Endpoint Data Preparer
//!
//! Converts input records (one JSON object per record) into request payloads
//! for a downstream inference endpoint via a `###<name>` placeholder
//! template, checks that rendered payloads match the endpoint's expected
//! shape, and derives ground-truth rows keyed by a deterministic hash of the
//! payload so the request and label streams can be joined after scoring.
//!
//! ## Architecture
//!
//! 1. **Renderer** (`renderer`): placeholder extraction, type-aware value
//!    encoding, and JSON re-parsing, as a fail-fast two-phase pipeline.
//!
//! 2. **Engine** (`engine`): payload-shape rules per endpoint capability;
//!    violations are data, never errors.
//!
//! 3. **Correlator** (`correlator`): payload hashing and ground-truth row
//!    construction under the reserved `payload_id`/`label` keys.
//!
//! 4. **Preparer** (`preparer`): façade fixing the full configuration at
//!    construction and driving the three components per record.
//!
//! 5. **CLI** (`cli`): batch processing over JSON Lines files with
//!    machine-readable output.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Render records into payloads plus ground-truth rows
//! endpoint-prepare prepare --records records.jsonl --template template.json \
//!     --model-type oss --label-field label --extra-columns "category" \
//!     --payloads-out payloads.jsonl --ground-truth-out truth.jsonl
//!
//! # Check rendered payloads against an endpoint's expected shape
//! endpoint-prepare validate --payloads payloads.jsonl --model-type aoai
//!
//! # Print the payload identifier for each payload
//! endpoint-prepare hash --payloads payloads.jsonl --model-type oss
//! ```
//!
//! ## Example
//!
//! ```rust
//! use endpoint_data_preparer::{EndpointDataPreparer, PreparerConfig};
//! use serde_json::json;
//!
//! let preparer = EndpointDataPreparer::new(
//!     PreparerConfig::new("oss", r#"{"input_data": {"input_string": ###<items>}}"#)
//!         .with_label_field("label"),
//! );
//!
//! let record = json!({"items": ["hello"], "label": "greeting"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let prepared = preparer.prepare(&record).unwrap();
//! assert!(prepared.violations.is_empty());
//! assert_eq!(prepared.ground_truth["label"], json!("greeting"));
//! ```

pub mod cli;
pub mod correlator;
pub mod engine;
pub mod error;
pub mod model;
pub mod preparer;
pub mod renderer;

// Re-export error types
pub use error::{PreparerError, Result};

// Re-export the model variant descriptor
pub use model::{Capability, ModelVariant};

// Re-export renderer types
pub use renderer::{extract_placeholders, TemplateRenderer, PLACEHOLDER_PATTERN};

// Re-export validation engine types
pub use engine::rules::{ShapeRule, Violation};
pub use engine::PayloadValidator;

// Re-export correlation types
pub use correlator::{
    GroundTruthCorrelator, PayloadHasher, Sha256PayloadHasher, LABEL_KEY, PAYLOAD_ID_KEY,
};

// Re-export the preparer façade
pub use preparer::{parse_column_list, EndpointDataPreparer, PreparedRecord, PreparerConfig};

// Re-export CLI types for command-line usage
pub use cli::{ExitCode, OutputFormat, PreparerCli, PreparerCommands};

/// Preparer version (from Cargo.toml)
pub const PREPARER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use endpoint_data_preparer::{run_cli, PreparerCli};
///
/// fn main() {
///     let cli = PreparerCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: PreparerCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            match &e {
                PreparerError::FileError(_) => ExitCode::FileError,
                _ if e.is_user_error() => ExitCode::InvalidInput,
                _ => ExitCode::InternalError,
            }
        }
    }
}
