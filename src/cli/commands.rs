//! CLI command definitions for the Endpoint Data Preparer
//!
//! Provides Clap-based command definitions for preparing batches of records,
//! validating rendered payloads, and printing payload identifiers.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

use super::output::{BatchReport, HashLine, HashReport, LineReport, OutputFormat};
use super::ExitCode;
use crate::correlator::{PayloadHasher, Sha256PayloadHasher};
use crate::engine::PayloadValidator;
use crate::error::{PreparerError, Result};
use crate::model::ModelVariant;
use crate::preparer::{EndpointDataPreparer, PreparerConfig};

/// Endpoint Data Preparer CLI
///
/// Render input records into endpoint payloads, check payload shapes, and
/// derive the ground-truth rows that join back to the payloads by hash.
#[derive(Parser, Debug)]
#[command(name = "endpoint-prepare")]
#[command(about = "Endpoint Data Preparer - render, validate and correlate batch inference payloads", long_about = None)]
#[command(version)]
pub struct PreparerCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: PreparerCommands,
}

/// Available preparer commands
#[derive(Subcommand, Debug)]
pub enum PreparerCommands {
    /// Render records into payloads and matching ground-truth rows
    ///
    /// Reads one JSON object per line, renders each through the template,
    /// and writes two JSON Lines streams: the payloads and the ground-truth
    /// rows keyed by payload hash.
    Prepare {
        /// Path to the input records (JSON Lines, one object per line)
        #[arg(short, long)]
        records: PathBuf,

        /// Path to the payload template file
        #[arg(short, long)]
        template: PathBuf,

        /// Model type of the target endpoint (e.g. oss, aoai, vision_oss)
        #[arg(short, long)]
        model_type: String,

        /// Record field holding the ground-truth label
        #[arg(long)]
        label_field: Option<String>,

        /// Comma-separated record fields copied into the ground-truth rows
        #[arg(long)]
        extra_columns: Option<String>,

        /// Where to write the rendered payloads (JSON Lines)
        #[arg(long)]
        payloads_out: PathBuf,

        /// Where to write the ground-truth rows (JSON Lines)
        #[arg(long)]
        ground_truth_out: PathBuf,

        /// Output format for the preparation report
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Check rendered payloads against an endpoint's expected shape
    ///
    /// Reads one JSON payload per line and reports shape violations for the
    /// given model type. Violations are findings, not errors; the exit code
    /// reflects whether any were found.
    Validate {
        /// Path to the rendered payloads (JSON Lines)
        #[arg(short, long)]
        payloads: PathBuf,

        /// Model type of the target endpoint
        #[arg(short, long)]
        model_type: String,

        /// Output format for validation results
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Print the payload identifier for each rendered payload
    ///
    /// Useful for ad-hoc joins between payload and ground-truth streams.
    Hash {
        /// Path to the rendered payloads (JSON Lines)
        #[arg(short, long)]
        payloads: PathBuf,

        /// Model type of the target endpoint
        #[arg(short, long)]
        model_type: String,

        /// Output format for the identifier listing
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },
}

/// Execute the prepare command
#[allow(clippy::too_many_arguments)]
pub fn execute_prepare(
    records: PathBuf,
    template: PathBuf,
    model_type: String,
    label_field: Option<String>,
    extra_columns: Option<String>,
    payloads_out: PathBuf,
    ground_truth_out: PathBuf,
    format: Option<OutputFormat>,
) -> Result<ExitCode> {
    let template_text = read_file(&template)?;

    let mut config = PreparerConfig::new(model_type, template_text);
    if let Some(field) = label_field {
        config = config.with_label_field(field);
    }
    if let Some(columns) = &extra_columns {
        config = config.with_extra_columns(columns);
    }
    let preparer = EndpointDataPreparer::new(config);

    let input_records = load_records(&records)?;
    info!(
        record_count = input_records.len(),
        model_type = preparer.variant().model_type(),
        "preparing batch"
    );

    let mut payload_lines = Vec::new();
    let mut ground_truth_lines = Vec::new();
    let mut lines = Vec::new();

    for (index, record) in input_records.iter().enumerate() {
        let line = index + 1;
        match preparer.prepare(record) {
            Ok(prepared) => {
                let payload_id = prepared.ground_truth[crate::correlator::PAYLOAD_ID_KEY]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                payload_lines.push(serde_json::to_string(&prepared.payload)?);
                ground_truth_lines.push(serde_json::to_string(&prepared.ground_truth)?);
                lines.push(LineReport {
                    line,
                    payload_id: Some(payload_id),
                    violations: prepared.violations,
                    error: None,
                });
            }
            Err(e) if e.is_user_error() => {
                lines.push(LineReport {
                    line,
                    payload_id: None,
                    violations: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        }
    }

    write_jsonl(&payloads_out, &payload_lines)?;
    write_jsonl(&ground_truth_out, &ground_truth_lines)?;

    let report = BatchReport::from_lines("prepare", lines);
    report.render(format.unwrap_or_default())?;

    Ok(ExitCode::from_batch_result(report.is_clean()))
}

/// Execute the validate command
pub fn execute_validate(
    payloads: PathBuf,
    model_type: String,
    format: Option<OutputFormat>,
) -> Result<ExitCode> {
    let variant = ModelVariant::from_model_type(&model_type);
    let validator = PayloadValidator::new(variant.clone());
    let hasher = Sha256PayloadHasher::new();

    let payload_values = load_payloads(&payloads)?;
    let lines = payload_values
        .iter()
        .enumerate()
        .map(|(index, payload)| LineReport {
            line: index + 1,
            payload_id: Some(hasher.hash(payload, &variant)),
            violations: validator.validate(payload),
            error: None,
        })
        .collect();

    let report = BatchReport::from_lines("validate", lines);
    report.render(format.unwrap_or_default())?;

    Ok(ExitCode::from_batch_result(report.is_clean()))
}

/// Execute the hash command
pub fn execute_hash(
    payloads: PathBuf,
    model_type: String,
    format: Option<OutputFormat>,
) -> Result<ExitCode> {
    let variant = ModelVariant::from_model_type(&model_type);
    let hasher = Sha256PayloadHasher::new();

    let payload_values = load_payloads(&payloads)?;
    let payload_ids = payload_values
        .iter()
        .enumerate()
        .map(|(index, payload)| HashLine {
            line: index + 1,
            payload_id: hasher.hash(payload, &variant),
        })
        .collect::<Vec<_>>();

    let report = HashReport {
        total: payload_ids.len(),
        payload_ids,
    };
    report.render(format.unwrap_or_default())?;

    Ok(ExitCode::Success)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        PreparerError::FileError(format!("Failed to read file '{}': {}", path.display(), e))
    })
}

/// Load a JSON Lines file of records, each line one JSON object
fn load_records(path: &Path) -> Result<Vec<Map<String, Value>>> {
    load_payloads(path)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(map) => Ok(map),
            other => Err(PreparerError::invalid_input(format!(
                "record on line {} of '{}' is not a JSON object: {}",
                index + 1,
                path.display(),
                other
            ))),
        })
        .collect()
}

/// Load a JSON Lines file of payloads, each line any JSON value
fn load_payloads(path: &Path) -> Result<Vec<Value>> {
    let content = read_file(path)?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                PreparerError::parse_error(format!(
                    "line {} of '{}': {}",
                    index + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}

fn write_jsonl(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|e| {
        PreparerError::FileError(format!("Failed to write file '{}': {}", path.display(), e))
    })
}
