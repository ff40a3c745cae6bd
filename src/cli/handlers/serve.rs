//! Serve command handler
//!
//! Validates the merged configuration and either prints a dry-run
//! summary or starts the HTTP server.

use crate::config::{Settings, StorageBackend};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command.
    ///
    /// With `dry_run` the configuration is validated and summarized
    /// without binding a listener; otherwise the server runs until
    /// shutdown.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup or runtime errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        self.config.validate()?;

        if dry_run {
            self.print_validation_summary();
            return Ok(());
        }

        Server::new(self.config.clone()).run().await?;
        Ok(())
    }

    fn print_validation_summary(&self) {
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Storage backend: {}", self.config.storage.backend.as_str());
        if self.config.storage.backend == StorageBackend::Postgres {
            println!("✓ Database URL is configured");
        }
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
