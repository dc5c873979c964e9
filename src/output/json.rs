//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of computed updates
//! - Per-file applied/skipped information

use crate::domain::{DependencyUpdate, PatchSkip};
use crate::orchestrator::RunResult;
use crate::output::{display_referrer, OutputFormatter};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    root: String,
    dry_run: bool,
    summary: JsonSummary,
    updates: &'a [DependencyUpdate],
    files: Vec<JsonFile<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    updates: usize,
    applied: usize,
    skipped: usize,
    files_modified: usize,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    applied: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<JsonSkip<'a>>,
}

#[derive(Serialize)]
struct JsonSkip<'a> {
    specifier: &'a str,
    reason: &'a PatchSkip,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let files = result
            .patches
            .iter()
            .map(|patch| JsonFile {
                path: display_referrer(&patch.referrer, &result.root),
                applied: patch.applied_count(),
                skipped: patch
                    .skipped
                    .iter()
                    .map(|(update, reason)| JsonSkip {
                        specifier: &update.specifier,
                        reason,
                    })
                    .collect(),
            })
            .collect();

        let output = JsonOutput {
            root: result.root.to_string(),
            dry_run: result.dry_run,
            summary: JsonSummary {
                updates: result.updates.len(),
                applied: result.applied_count(),
                skipped: result.skipped_count(),
                files_modified: result.files_modified(),
            },
            updates: &result.updates,
            files,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
