//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate, inspect and convert branching-narrative scenarios.
#[derive(Parser, Debug)]
#[command(name = "fabula")]
#[command(about = "Validate, inspect and convert branching-narrative scenarios")]
#[command(version)]
pub struct Cli {
    /// Validation configuration file (TOML)
    #[arg(long, global = true, env = "FABULA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print statistics and every path; raise log level to info
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a scenario file and save it as formatted JSON
    Validate {
        /// Scenario file (JSON, or generator output with --extract)
        input: PathBuf,

        /// Where to save the JSON (default: input path with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the input as free text and extract the embedded JSON document
        #[arg(long)]
        extract: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ValidationOutputFormat::Human)]
        format: ValidationOutputFormat,
    },

    /// List every path from the start scene to an ending
    Paths {
        /// Scenario file
        input: PathBuf,

        /// Start scene (default: configured start scene)
        #[arg(long)]
        start: Option<String>,

        /// Treat the input as free text and extract the embedded JSON document
        #[arg(long)]
        extract: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ValidationOutputFormat::Human)]
        format: ValidationOutputFormat,
    },

    /// Show scene, branch and path statistics
    Stats {
        /// Scenario file
        input: PathBuf,

        /// Treat the input as free text and extract the embedded JSON document
        #[arg(long)]
        extract: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ValidationOutputFormat::Human)]
        format: ValidationOutputFormat,
    },

    /// Convert generator output into a formatted JSON document without validating it
    Extract {
        /// Text file containing a JSON document
        input: PathBuf,

        /// Where to save the JSON (default: input path with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationOutputFormat {
    /// Human-readable report
    Human,
    /// Machine-readable JSON
    Json,
}
