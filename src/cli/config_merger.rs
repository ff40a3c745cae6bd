//! Configuration merger for CLI arguments and config files
//!
//! Applies the configuration precedence rules: file-based settings form
//! the base, and CLI arguments override them.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Environment, Settings};
use std::path::PathBuf;

/// Merges CLI argument overrides into file-based configuration.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a merger around an already-loaded base configuration.
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a merger by loading configuration for the given CLI options.
    ///
    /// `--config FILE` switches the loader to single-file mode; `--env`
    /// overrides the detected environment for layered loading.
    ///
    /// # Errors
    /// Returns `ConfigError` if loading or validation of the base
    /// configuration fails.
    pub fn from_cli(
        config_path: Option<&PathBuf>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = match config_path {
            Some(path) => ConfigLoader::with_config_file(path.clone()),
            None => ConfigLoader::new()?,
        };

        if let Some(env) = environment {
            loader = loader.with_environment(env);
        }

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration.
    ///
    /// Global flags apply first, then command-specific overrides, and the
    /// merged result is validated before being returned.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve { host, port, log_level, dry_run: _ } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                // Command-specific log level wins over global --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = level.clone().into();
                }
            }
            Commands::Migrate { dry_run: _, rollback: _ } => {}
        }
    }

    /// The base configuration before any CLI overrides.
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
