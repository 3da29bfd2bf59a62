//! Extraction command handler.

use super::report::{CommandStatus, write_json};
use fabula_error::{FabulaResult, IoError, ScenarioError, ScenarioErrorKind};
use fabula_scenario::{DuplicatePolicy, ScenarioGraph, Validator, extract_document};
use serde_json::Value;
use std::path::PathBuf;

/// Handles the extract command: converts generator output into a JSON file.
///
/// The document is saved even when it is not a well-formed scenario; a
/// structural problem is only reported. Run `validate` for the full checks.
#[tracing::instrument(skip_all, fields(path = %input.display()))]
pub fn handle_extract_command(
    validator: &Validator,
    input: PathBuf,
    output: Option<PathBuf>,
) -> FabulaResult<CommandStatus> {
    let text = std::fs::read_to_string(&input)
        .map_err(|e| IoError::new(format!("Failed to read '{}': {}", input.display(), e)))?;

    let document = extract_document(&text).ok_or_else(|| {
        ScenarioError::new(ScenarioErrorKind::Parse(
            "no JSON document found in text".to_string(),
        ))
    })?;

    let output = output.unwrap_or_else(|| input.with_extension("json"));
    write_json(&output, &document)?;
    println!("JSON saved to {}", output.display());

    match structure(&document, *validator.config().duplicate_policy()) {
        Ok(scenes) => println!("  {} scenes", scenes),
        Err(e) => {
            tracing::warn!(error = %e, "Extracted document is not a well-formed scenario");
            println!("  ⚠ not a well-formed scenario: {}", e.message());
        }
    }

    Ok(CommandStatus::Success)
}

/// Number of distinct scenes, if the document has scenario structure.
fn structure(document: &Value, policy: DuplicatePolicy) -> Result<usize, ScenarioError> {
    ScenarioGraph::from_document(document, policy).map(|graph| graph.len())
}
