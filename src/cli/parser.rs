//! CLI argument parsing with clap
//!
//! Defines the command-line surface of the turnero binary: the serve and
//! migrate subcommands plus the global configuration flags.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Appointment booking API server for a barber shop
#[derive(Parser, Debug)]
#[command(name = "turnero")]
#[command(version)]
#[command(about = "Appointment booking API server for a barber shop")]
#[command(long_about = "
Turnero manages barber shop appointments (turns) over a RESTful API,
with pluggable storage and layered configuration.

EXAMPLES:
    # Start the server with default configuration
    turnero serve

    # Bind to all interfaces on port 8080
    turnero serve --host 0.0.0.0 --port 8080

    # Use a custom configuration file
    turnero --config /etc/turnero/production.toml serve

    # Validate the configuration without starting
    turnero serve --dry-run

    # Apply pending database migrations
    turnero migrate

    # Preview pending migrations
    turnero migrate --dry-run

    # Roll back the last 2 migrations
    turnero migrate --rollback 2
")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a specific TOML configuration file instead of the layered
    /// files in the configuration directory. The file must exist and
    /// be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Forces a specific environment, which selects the per-environment
    /// configuration file that is layered over the defaults.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no subcommand is given)
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface. Overrides the configured host.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535. Overrides the configured port.
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and over the
        /// global --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to roll back (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
