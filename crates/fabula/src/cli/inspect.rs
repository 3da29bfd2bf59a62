//! Path listing and statistics command handlers.

use super::ValidationOutputFormat;
use super::report::{
    CommandStatus, format_path, load_graph, print_json, print_paths, print_stats,
};
use fabula_error::FabulaResult;
use fabula_scenario::{Enumeration, PathEnumerator, ScenarioGraph, ScenarioStats, Validator};
use serde_json::json;
use std::path::PathBuf;

/// Handles the paths command: lists every path of a valid scenario.
#[tracing::instrument(skip_all, fields(path = %input.display()))]
pub fn handle_paths_command(
    validator: &Validator,
    input: PathBuf,
    start: Option<String>,
    extract: bool,
    format: ValidationOutputFormat,
) -> FabulaResult<CommandStatus> {
    let Some(graph) = load_graph(validator, &input, extract, format)? else {
        return Ok(CommandStatus::Failed);
    };

    let (root, enumeration) = enumerate_from(validator, &graph, start)?;

    match format {
        ValidationOutputFormat::Human => {
            println!("Paths from '{}': {}", root, enumeration.paths().len());
            print_paths(enumeration.paths());
            if *enumeration.dropped_branches() > 0 {
                println!(
                    "\n  {} branch(es) loop back without reaching an ending",
                    enumeration.dropped_branches()
                );
            }
        }
        ValidationOutputFormat::Json => print_json(&json!({
            "file": input.display().to_string(),
            "start": root,
            "paths": enumeration.paths(),
            "formatted": enumeration.paths().iter().map(|p| format_path(p)).collect::<Vec<_>>(),
            "dropped_branches": enumeration.dropped_branches(),
        }))?,
    }

    Ok(CommandStatus::Success)
}

/// Enumerates from `start` (default: the configured start scene), returning the
/// scene actually used as root.
fn enumerate_from(
    validator: &Validator,
    graph: &ScenarioGraph,
    start: Option<String>,
) -> FabulaResult<(String, Enumeration)> {
    let config = validator.config();
    let requested = start.unwrap_or_else(|| config.start_scene().clone());
    let root = graph.start_scene(&requested).unwrap_or_default().to_string();
    if root != requested {
        tracing::warn!(%requested, %root, "Start scene not found, using first scene");
    }

    let enumeration = PathEnumerator::new(graph, *config.limits()).enumerate(&root)?;
    Ok((root, enumeration))
}

/// Handles the stats command: summarizes a valid scenario.
#[tracing::instrument(skip_all, fields(path = %input.display()))]
pub fn handle_stats_command(
    validator: &Validator,
    input: PathBuf,
    extract: bool,
    format: ValidationOutputFormat,
) -> FabulaResult<CommandStatus> {
    let Some(graph) = load_graph(validator, &input, extract, format)? else {
        return Ok(CommandStatus::Failed);
    };
    let config = validator.config();

    let paths = graph.find_all_paths(config.start_scene(), *config.limits())?;
    let stats = ScenarioStats::collect(&graph, &paths);

    match format {
        ValidationOutputFormat::Human => {
            println!("{}", input.display());
            print_stats(&stats);
        }
        ValidationOutputFormat::Json => print_json(&json!({
            "file": input.display().to_string(),
            "stats": stats,
        }))?,
    }

    Ok(CommandStatus::Success)
}
