//! Command handlers for CLI operations
//!
//! Execution logic for each subcommand, kept separate from argument
//! parsing and configuration merging.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
