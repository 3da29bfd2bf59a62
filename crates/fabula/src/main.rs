//! Fabula command-line tool.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CommandStatus, Commands};
use fabula_scenario::{ValidationConfig, Validator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that --format json output stays parseable.
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = ValidationConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Using validation configuration");
    let validator = Validator::new(config);

    let status = match cli.command {
        Commands::Validate {
            input,
            output,
            extract,
            format,
        } => {
            cli::handle_validate_command(&validator, input, output, extract, format, cli.verbose)?
        }
        Commands::Paths {
            input,
            start,
            extract,
            format,
        } => cli::handle_paths_command(&validator, input, start, extract, format)?,
        Commands::Stats {
            input,
            extract,
            format,
        } => cli::handle_stats_command(&validator, input, extract, format)?,
        Commands::Extract { input, output } => {
            cli::handle_extract_command(&validator, input, output)?
        }
    };

    if status == CommandStatus::Failed {
        std::process::exit(status.exit_code());
    }

    Ok(())
}
