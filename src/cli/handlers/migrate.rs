//! Migrate command handler
//!
//! Runs, previews, and rolls back schema migrations against the
//! configured PostgreSQL database.

use crate::config::Settings;
use crate::db::{self, MIGRATIONS};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command.
    ///
    /// # Arguments
    /// * `dry_run` - If true, lists pending migrations without applying them
    /// * `rollback` - Optional number of migrations to roll back
    ///
    /// # Errors
    /// - Database configuration or connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        // Migrations always need a reachable database, regardless of which
        // storage backend the server itself is configured with.
        self.config.database.validate()?;

        if dry_run {
            return self.show_pending_migrations().await;
        }

        match rollback {
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    /// List pending migrations without applying them.
    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let database_url = self.config.database.url.clone();
        let pending: Vec<String> = tokio::task::spawn_blocking(move || {
            use diesel::Connection;
            use diesel::pg::PgConnection;
            use diesel_migrations::MigrationHarness;

            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: "establish connection for migration check".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                })?;

            let pending =
                conn.pending_migrations(MIGRATIONS)
                    .map_err(|e| AppError::Database {
                        operation: "check pending migrations".to_string(),
                        source: anyhow::anyhow!("Migration error: {}", e),
                    })?;

            Ok::<_, AppError>(pending.iter().map(|m| m.name().to_string()).collect())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if pending.is_empty() {
            println!("✓ No pending migrations - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply them");
        }

        Ok(())
    }

    /// Apply all pending migrations.
    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = db::run_pending_migrations(self.config.database.url.clone()).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {}", name);
            }
        }

        Ok(())
    }

    /// Revert the given number of most recent migrations.
    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::BadRequest {
                message: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {} migration(s)...", steps);

        let database_url = self.config.database.url.clone();
        let reverted: Vec<String> = tokio::task::spawn_blocking(move || {
            use diesel::Connection;
            use diesel::pg::PgConnection;
            use diesel_migrations::MigrationHarness;

            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: "establish connection for rollback".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                })?;

            let applied = conn
                .applied_migrations()
                .map_err(|e| AppError::Database {
                    operation: "get applied migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                })?;

            if applied.len() < steps as usize {
                return Err(AppError::BadRequest {
                    message: format!(
                        "Cannot roll back {} migrations; only {} are applied",
                        steps,
                        applied.len()
                    ),
                });
            }

            let mut reverted = Vec::with_capacity(steps as usize);
            for _ in 0..steps {
                let version =
                    conn.revert_last_migration(MIGRATIONS)
                        .map_err(|e| AppError::Database {
                            operation: "revert migration".to_string(),
                            source: anyhow::anyhow!("Migration rollback error: {}", e),
                        })?;
                reverted.push(version.to_string());
            }

            Ok::<_, AppError>(reverted)
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for name in &reverted {
            println!("  - {}", name);
        }

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
