//! CLI module for turnero
//!
//! Command-line interface functionality:
//! - Argument parsing with clap
//! - Configuration merging (CLI args over config files)
//! - Command execution for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::Settings;
use crate::logger::init_logger;

/// Load and merge configuration for a parsed CLI invocation.
///
/// Loads the base configuration (respecting `--config` and `--env`),
/// applies CLI overrides, and validates the result.
///
/// # Errors
/// Returns an error if configuration loading, merging, or validation
/// fails.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let environment = cli.env.clone().map(Into::into);
    let merger = ConfigurationMerger::from_cli(cli.config.as_ref(), environment)?;
    let settings = merger.merge_cli_args(cli)?;
    Ok(settings)
}

/// Initialize the global tracing subscriber from settings.
///
/// # Errors
/// Returns an error if the logger configuration is invalid or the
/// subscriber was already installed.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)
}
