//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fabula binary.

mod commands;
mod extract;
mod inspect;
mod report;
mod validate;

pub use commands::{Cli, Commands, ValidationOutputFormat};
pub use extract::handle_extract_command;
pub use inspect::{handle_paths_command, handle_stats_command};
pub use report::CommandStatus;
pub use validate::handle_validate_command;
