//! Endpoint Data Preparer CLI
//!
//! Command-line interface for the Endpoint Data Preparer.
//!
//! # Usage
//!
//! ```bash
//! # Render records into payloads plus ground-truth rows
//! endpoint-prepare prepare --records records.jsonl --template template.json \
//!     --model-type oss --payloads-out payloads.jsonl --ground-truth-out truth.jsonl
//!
//! # Check rendered payloads against an endpoint's expected shape
//! endpoint-prepare validate --payloads payloads.jsonl --model-type aoai
//!
//! # Print the payload identifier for each payload
//! endpoint-prepare hash --payloads payloads.jsonl --model-type oss
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - every record clean
//! - 1: At least one record failed to render or violated its expected shape
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

use clap::Parser;
use endpoint_data_preparer::{run_cli, PreparerCli};

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let cli = PreparerCli::parse();

    // Run the CLI and exit with appropriate code
    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
