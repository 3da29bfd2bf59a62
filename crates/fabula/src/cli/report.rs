//! Loading and printing helpers shared by the command handlers.

use super::ValidationOutputFormat;
use fabula_error::{FabulaResult, IoError, JsonError};
use fabula_scenario::{
    FileValidation, ScenarioGraph, ScenarioStats, ValidationOutcome, Validator,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did its job
    Success,
    /// The input failed validation; the failure has been reported
    Failed,
}

impl CommandStatus {
    /// Process exit code for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
        }
    }
}

/// Validates `input`, extracting embedded JSON first when `extract` is set.
pub(crate) fn load(validator: &Validator, input: &Path, extract: bool) -> FileValidation {
    if extract {
        validator.validate_text_file(input)
    } else {
        validator.validate_file(input)
    }
}

/// Loads a valid scenario graph, or reports the failure and returns `None`.
pub(crate) fn load_graph(
    validator: &Validator,
    input: &Path,
    extract: bool,
    format: ValidationOutputFormat,
) -> FabulaResult<Option<ScenarioGraph>> {
    let (outcome, _) = load(validator, input, extract).into_parts();
    if !outcome.is_valid() {
        print_failure(input, &outcome, format)?;
        return Ok(None);
    }
    Ok(Some(outcome.into_result()?))
}

/// Where a validated document is saved, or `None` when no write is needed.
///
/// Defaults to `input` with a `.json` extension. A plain JSON input already
/// holds the document, so it is not rewritten; extracted input always is.
pub(crate) fn output_target(
    input: &Path,
    output: Option<PathBuf>,
    extract: bool,
) -> Option<PathBuf> {
    let output = output.unwrap_or_else(|| input.with_extension("json"));
    if !extract && output == input {
        None
    } else {
        Some(output)
    }
}

/// JSON report of a failed validation.
pub(crate) fn failure_json(path: &Path, outcome: &ValidationOutcome) -> Value {
    json!({
        "valid": false,
        "file": path.display().to_string(),
        "stage": outcome.stage(),
        "message": outcome.message(),
    })
}

/// Prints a failed validation.
pub(crate) fn print_failure(
    path: &Path,
    outcome: &ValidationOutcome,
    format: ValidationOutputFormat,
) -> FabulaResult<()> {
    match format {
        ValidationOutputFormat::Human => {
            println!("\n❌ {}", path.display());
            println!("{}", "─".repeat(80));
            if let Some(stage) = outcome.stage() {
                println!("\n  Failed stage: {}", stage);
            }
            println!("  {}", outcome.message());
            Ok(())
        }
        ValidationOutputFormat::Json => print_json(&failure_json(path, outcome)),
    }
}

/// Renders a path as `start → a → end (3 scenes)`.
pub(crate) fn format_path(path: &[String]) -> String {
    format!("{} ({} scenes)", path.join(" → "), path.len())
}

pub(crate) fn print_paths(paths: &[Vec<String>]) {
    for (i, path) in paths.iter().enumerate() {
        println!("  {}. {}", i + 1, format_path(path));
    }
}

pub(crate) fn print_stats(stats: &ScenarioStats) {
    println!("  • Scenes: {}", stats.scene_count());
    println!("  • Branches: {}", stats.branch_count());
    println!("  • Endings: {}", stats.ending_count());
    if let (Some(max), Some(min)) = (stats.max_path_length(), stats.min_path_length()) {
        println!("  • Longest path: {} scenes", max);
        println!("  • Shortest path: {} scenes", min);
    }
    println!("  • Paths: {}", stats.path_count());
}

pub(crate) fn print_json(value: &Value) -> FabulaResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Writes `document` as pretty-printed UTF-8 JSON.
pub(crate) fn write_json(path: &Path, document: &Value) -> FabulaResult<()> {
    let rendered = serde_json::to_string_pretty(document)
        .map_err(|e| JsonError::new(format!("Failed to encode document: {}", e)))?;
    std::fs::write(path, rendered + "\n")
        .map_err(|e| IoError::new(format!("Failed to write '{}': {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "Saved JSON document");
    Ok(())
}
