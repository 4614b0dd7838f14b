//! CLI module for the Endpoint Data Preparer
//!
//! This module provides command-line interface functionality for preparing
//! record batches, validating payload shapes, and printing payload
//! identifiers for ad-hoc joins.

pub mod commands;
pub mod output;

pub use commands::{PreparerCli, PreparerCommands};
pub use output::{BatchReport, HashReport, LineReport, OutputFormat};

use crate::error::Result;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, every record clean
    Success = 0,
    /// At least one record failed to render or violated its expected shape
    BatchError = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from a batch outcome
    pub fn from_batch_result(is_clean: bool) -> Self {
        if is_clean {
            ExitCode::Success
        } else {
            ExitCode::BatchError
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: PreparerCli) -> Result<ExitCode> {
    match cli.command {
        PreparerCommands::Prepare {
            records,
            template,
            model_type,
            label_field,
            extra_columns,
            payloads_out,
            ground_truth_out,
            format,
        } => commands::execute_prepare(
            records,
            template,
            model_type,
            label_field,
            extra_columns,
            payloads_out,
            ground_truth_out,
            format,
        ),
        PreparerCommands::Validate {
            payloads,
            model_type,
            format,
        } => commands::execute_validate(payloads, model_type, format),
        PreparerCommands::Hash {
            payloads,
            model_type,
            format,
        } => commands::execute_hash(payloads, model_type, format),
    }
}
