//! Integration tests for the Endpoint Data Preparer
//!
//! Tests the full preparation flow:
//! - Render -> validate -> correlate over single records
//! - Joinability of the payload and ground-truth streams by payload_id
//! - Batch CLI commands over JSON Lines files

use endpoint_data_preparer::{
    cli::commands::{execute_hash, execute_prepare, execute_validate},
    EndpointDataPreparer, ExitCode, ModelVariant, OutputFormat, PayloadHasher, PreparerConfig,
    PreparerError, Sha256PayloadHasher, LABEL_KEY, PAYLOAD_ID_KEY,
};
use serde_json::{json, Map, Value};
use std::io::Write;
use tempfile::TempDir;

fn record_from(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

/// Helper to write a file into a temp directory
fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn read_jsonl(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_full_preparation_flow() {
    let preparer = EndpointDataPreparer::new(
        PreparerConfig::new("oss", r#"{"input_data": {"input_string": ###<items>}}"#)
            .with_label_field("label")
            .with_extra_columns("category, source"),
    );

    let record = record_from(json!({
        "items": ["what is a cat?"],
        "label": "animal",
        "category": "pets",
        "source": "faq"
    }));

    let prepared = preparer.prepare(&record).unwrap();

    // payload matches the template with the list substituted in place
    assert_eq!(
        prepared.payload,
        json!({"input_data": {"input_string": ["what is a cat?"]}})
    );

    // an OSS-shaped payload passes the OSS shape check
    assert!(prepared.violations.is_empty());

    // ground truth carries the reserved keys plus the configured columns
    assert_eq!(prepared.ground_truth[LABEL_KEY], json!("animal"));
    assert_eq!(prepared.ground_truth["category"], json!("pets"));
    assert_eq!(prepared.ground_truth["source"], json!("faq"));

    // the id joins back to the exact rendered payload
    let hasher = Sha256PayloadHasher::new();
    let expected = hasher.hash(&prepared.payload, &ModelVariant::from_model_type("oss"));
    assert_eq!(prepared.ground_truth[PAYLOAD_ID_KEY], json!(expected));
}

#[test]
fn test_join_invariant_across_records() {
    let preparer = EndpointDataPreparer::new(PreparerConfig::new(
        "aoai",
        r####"{"prompt": "###<question>"}"####,
    ));

    let first = preparer
        .prepare(&record_from(json!({"question": "one"})))
        .unwrap();
    let second = preparer
        .prepare(&record_from(json!({"question": "two"})))
        .unwrap();
    let first_again = preparer
        .prepare(&record_from(json!({"question": "one"})))
        .unwrap();

    // equal payloads share an id, distinct payloads do not
    assert_eq!(
        first.ground_truth[PAYLOAD_ID_KEY],
        first_again.ground_truth[PAYLOAD_ID_KEY]
    );
    assert_ne!(
        first.ground_truth[PAYLOAD_ID_KEY],
        second.ground_truth[PAYLOAD_ID_KEY]
    );
}

#[test]
fn test_render_errors_surface_placeholder_names() {
    let preparer = EndpointDataPreparer::new(PreparerConfig::new(
        "oss",
        r####"{"text": "###<prompt>", "other": "###<missing field>"}"####,
    ));
    let err = preparer
        .prepare(&record_from(json!({"prompt": "hi"})))
        .unwrap_err();
    match err {
        PreparerError::PlaceholderMissing { placeholders } => {
            assert_eq!(placeholders, vec!["missing field".to_string()]);
        }
        other => panic!("expected PlaceholderMissing, got {:?}", other),
    }
}

#[test]
fn test_cli_prepare_writes_joinable_streams() {
    let dir = TempDir::new().unwrap();
    let records = write_file(
        &dir,
        "records.jsonl",
        concat!(
            "{\"items\": [1, 2], \"label\": \"a\", \"extra\": \"x\"}\n",
            "{\"items\": [3], \"label\": \"b\", \"extra\": \"y\"}\n",
        ),
    );
    let template = write_file(
        &dir,
        "template.json",
        r#"{"input_data": {"input_string": ###<items>}}"#,
    );
    let payloads_out = dir.path().join("payloads.jsonl");
    let truth_out = dir.path().join("truth.jsonl");

    let code = execute_prepare(
        records,
        template,
        "oss".to_string(),
        Some("label".to_string()),
        Some("extra".to_string()),
        payloads_out.clone(),
        truth_out.clone(),
        Some(OutputFormat::Json),
    )
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let payloads = read_jsonl(&payloads_out);
    let truths = read_jsonl(&truth_out);
    assert_eq!(payloads.len(), 2);
    assert_eq!(truths.len(), 2);

    // each ground-truth row joins to its payload line by hash
    let hasher = Sha256PayloadHasher::new();
    let variant = ModelVariant::from_model_type("oss");
    for (payload, truth) in payloads.iter().zip(&truths) {
        assert_eq!(truth[PAYLOAD_ID_KEY], json!(hasher.hash(payload, &variant)));
    }
    assert_eq!(truths[0][LABEL_KEY], json!("a"));
    assert_eq!(truths[1]["extra"], json!("y"));
}

#[test]
fn test_cli_prepare_reports_per_line_failures() {
    let dir = TempDir::new().unwrap();
    // second record is missing the templated field
    let records = write_file(
        &dir,
        "records.jsonl",
        "{\"prompt\": \"hello\"}\n{\"other\": 1}\n",
    );
    let template = write_file(&dir, "template.json", r####"{"prompt": "###<prompt>"}"####);
    let payloads_out = dir.path().join("payloads.jsonl");
    let truth_out = dir.path().join("truth.jsonl");

    let code = execute_prepare(
        records,
        template,
        "aoai".to_string(),
        None,
        None,
        payloads_out.clone(),
        truth_out,
        Some(OutputFormat::Json),
    )
    .unwrap();
    assert_eq!(code, ExitCode::BatchError);

    // the good line still made it out
    assert_eq!(read_jsonl(&payloads_out), vec![json!({"prompt": "hello"})]);
}

#[test]
fn test_cli_validate_flags_shape_violations() {
    let dir = TempDir::new().unwrap();
    let payloads = write_file(
        &dir,
        "payloads.jsonl",
        "{\"prompt\": \"fine\"}\n{\"prompt\": 5}\n",
    );

    let code = execute_validate(payloads, "aoai".to_string(), Some(OutputFormat::Json)).unwrap();
    assert_eq!(code, ExitCode::BatchError);
}

#[test]
fn test_cli_validate_clean_batch() {
    let dir = TempDir::new().unwrap();
    let payloads = write_file(
        &dir,
        "payloads.jsonl",
        "{\"input_data\": {\"input_string\": [\"a\"]}}\n",
    );

    let code = execute_validate(payloads, "oss".to_string(), Some(OutputFormat::Json)).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_cli_hash_matches_library_hasher() {
    let dir = TempDir::new().unwrap();
    let payloads = write_file(&dir, "payloads.jsonl", "{\"a\": 1}\n");

    let code = execute_hash(payloads, "oss".to_string(), Some(OutputFormat::Json)).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_cli_missing_file_is_a_file_error() {
    let dir = TempDir::new().unwrap();
    let err = execute_validate(
        dir.path().join("nope.jsonl"),
        "oss".to_string(),
        Some(OutputFormat::Json),
    )
    .unwrap_err();
    assert!(matches!(err, PreparerError::FileError(_)));
}
