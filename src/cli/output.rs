//! Output formatting for the Endpoint Data Preparer CLI
//!
//! Provides structured report output in JSON, YAML, and human-readable table
//! formats with per-line coloring for render failures and shape violations.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::engine::rules::Violation;
use crate::error::{PreparerError, Result};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format for configuration output
    Yaml,
}

/// Outcome of preparing or validating one input line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineReport {
    /// 1-based line number in the input file
    pub line: usize,
    /// Payload identifier, when the line produced a payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_id: Option<String>,
    /// Shape violations for the line's payload
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violations: Vec<Violation>,
    /// Render/correlation failure, when the line produced no payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LineReport {
    /// Whether the line rendered and passed every shape check
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.violations.is_empty()
    }
}

/// Report for a batch preparation or validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Total input lines processed
    pub total: usize,
    /// Lines that rendered and passed every shape check
    pub clean: usize,
    /// Lines that failed to render or correlate
    pub failed: usize,
    /// Lines whose payload violated the expected shape
    pub with_violations: usize,
    /// Summary message
    pub summary: String,
    /// Per-line outcomes; clean lines are omitted
    pub lines: Vec<LineReport>,
}

impl BatchReport {
    /// Build a report from per-line outcomes
    ///
    /// Clean lines are counted but dropped from the detail listing so the
    /// report stays readable over large batches.
    pub fn from_lines(operation: &str, lines: Vec<LineReport>) -> Self {
        let total = lines.len();
        let clean = lines.iter().filter(|l| l.is_clean()).count();
        let failed = lines.iter().filter(|l| l.error.is_some()).count();
        let with_violations = lines.iter().filter(|l| !l.violations.is_empty()).count();

        let summary = if clean == total {
            format!("{}: all {} record(s) are clean", operation, total)
        } else {
            format!(
                "{}: {} of {} record(s) clean, {} failed, {} with shape violations",
                operation, clean, total, failed, with_violations
            )
        };

        let lines = lines.into_iter().filter(|l| !l.is_clean()).collect();

        Self {
            total,
            clean,
            failed,
            with_violations,
            summary,
            lines,
        }
    }

    /// Whether every line was clean
    pub fn is_clean(&self) -> bool {
        self.clean == self.total
    }

    /// Render the report in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => self.render_table(),
        }
    }

    fn render_table(&self) -> Result<()> {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Batch Results".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();
        writeln!(stdout).ok();

        let status_icon = if self.is_clean() {
            "+".green()
        } else {
            "x".red()
        };
        writeln!(stdout, "{} {}", status_icon, self.summary).ok();

        if !self.lines.is_empty() {
            writeln!(stdout).ok();
            writeln!(stdout, "{}", "Problems:".cyan().bold()).ok();
            writeln!(stdout, "{}", "-".repeat(60)).ok();
            for line in &self.lines {
                line.render_table_row(&mut stdout);
            }
        }

        stdout.flush().ok();
        Ok(())
    }
}

impl LineReport {
    fn render_table_row(&self, stdout: &mut io::Stdout) {
        writeln!(stdout).ok();
        if let Some(error) = &self.error {
            writeln!(
                stdout,
                "{} line {}: {} {}",
                "x".red(),
                self.line,
                "FAILED".red().bold(),
                error
            )
            .ok();
            return;
        }
        writeln!(
            stdout,
            "{} line {}: {} violation(s)",
            "!".yellow(),
            self.line,
            self.violations.len().to_string().yellow()
        )
        .ok();
        if let Some(id) = &self.payload_id {
            writeln!(stdout, "  {} {}", "Payload:".dimmed(), id.cyan()).ok();
        }
        for violation in &self.violations {
            writeln!(
                stdout,
                "  {} [{}] {}",
                "-".dimmed(),
                violation.capability.to_string().dimmed(),
                violation.message
            )
            .ok();
        }
    }
}

/// Report for a hash run: one identifier per payload line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashReport {
    /// Total payload lines hashed
    pub total: usize,
    /// Per-line payload identifiers, in input order
    pub payload_ids: Vec<HashLine>,
}

/// One hashed payload line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashLine {
    /// 1-based line number in the input file
    pub line: usize,
    /// Stable identifier of the payload on that line
    pub payload_id: String,
}

impl HashReport {
    /// Render the report in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => {
                let mut stdout = io::stdout();
                for entry in &self.payload_ids {
                    writeln!(
                        stdout,
                        "{}  {}",
                        format!("{:>6}", entry.line).dimmed(),
                        entry.payload_id
                    )
                    .ok();
                }
                stdout.flush().ok();
                Ok(())
            }
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PreparerError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn render_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml =
        serde_yaml::to_string(value).map_err(|e| PreparerError::SerializationError(e.to_string()))?;
    println!("{}", yaml);
    Ok(())
}
