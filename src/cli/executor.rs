//! Command executor for dispatching CLI commands
//!
//! Entry point for running a parsed CLI invocation against merged
//! settings. Commands are dispatched to their handlers; the serve
//! command without a subcommand is the default.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings.
///
/// # Errors
/// Returns errors from the dispatched command handler.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    for warning in collect_warnings(cli) {
        eprintln!("Warning: {}", warning);
    }

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) if *dry_run => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve { .. }) | None => {
            ServeCommandHandler::new(settings).execute(false).await
        }
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

/// Advisory warnings for argument combinations that parse fine but
/// usually indicate a mistake.
fn collect_warnings(cli: &Cli) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(ref command) = cli.command {
        match command {
            Commands::Serve { host, port, .. } => {
                if let (Some(host_addr), Some(port_num)) = (host, port)
                    && host_addr == "0.0.0.0"
                    && *port_num < 1024
                {
                    warnings.push(format!(
                        "Binding to 0.0.0.0 on port {} requires elevated privileges",
                        port_num
                    ));
                }
            }
            Commands::Migrate { rollback, .. } => {
                if let Some(steps) = rollback
                    && *steps > 50
                {
                    warnings.push(format!(
                        "Rolling back {} migrations at once; consider smaller steps",
                        steps
                    ));
                }
            }
        }
    }

    warnings
}
