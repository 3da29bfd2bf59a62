//! Validation command handler.

use super::ValidationOutputFormat;
use super::report::{
    CommandStatus, format_path, load, output_target, print_failure, print_json, print_paths,
    print_stats, write_json,
};
use fabula_error::FabulaResult;
use fabula_scenario::{ScenarioStats, Validator};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Handles the validate command.
///
/// # Arguments
///
/// * `validator` - Configured validator
/// * `input` - Scenario file
/// * `output` - Where to save the JSON document (default: input with a `.json` extension)
/// * `extract` - Extract embedded JSON from free text before validating
/// * `format` - Output format (human or json)
/// * `verbose` - Include statistics and the full path listing
///
/// Returns [`CommandStatus::Failed`] once the failure has been reported.
#[tracing::instrument(skip_all, fields(path = %input.display()))]
pub fn handle_validate_command(
    validator: &Validator,
    input: PathBuf,
    output: Option<PathBuf>,
    extract: bool,
    format: ValidationOutputFormat,
    verbose: bool,
) -> FabulaResult<CommandStatus> {
    tracing::info!("Starting validation");

    let (outcome, document) = load(validator, &input, extract).into_parts();
    let (Some(graph), Some(document)) = (outcome.graph(), document) else {
        print_failure(&input, &outcome, format)?;
        return Ok(CommandStatus::Failed);
    };

    let saved = output_target(&input, output, extract);
    if let Some(saved) = &saved {
        write_json(saved, &document)?;
    }

    let details = if verbose {
        let config = validator.config();
        let paths = graph.find_all_paths(config.start_scene(), *config.limits())?;
        Some((ScenarioStats::collect(graph, &paths), paths))
    } else {
        None
    };

    match format {
        ValidationOutputFormat::Human => {
            println!("\n✅ {}", input.display());
            println!("{}", "─".repeat(80));
            println!("\n  {}", outcome.message());
            if let Some(saved) = &saved {
                println!("  JSON saved to {}", saved.display());
            }

            if let Some((stats, paths)) = &details {
                println!("\nDetails:");
                print_stats(stats);
                println!("\nAll paths:");
                print_paths(paths);
            }
        }
        ValidationOutputFormat::Json => {
            print_json(&success_json(&input, saved.as_deref(), details))?;
        }
    }

    Ok(CommandStatus::Success)
}

fn success_json(
    input: &Path,
    saved: Option<&Path>,
    details: Option<(ScenarioStats, Vec<Vec<String>>)>,
) -> Value {
    let (stats, paths) = details.unzip();
    json!({
        "valid": true,
        "file": input.display().to_string(),
        "stage": null,
        "message": fabula_scenario::SUCCESS_MESSAGE,
        "output": saved.map(|p| p.display().to_string()),
        "stats": stats,
        "paths": paths.map(|paths| paths.iter().map(|p| format_path(p)).collect::<Vec<_>>()),
    })
}
