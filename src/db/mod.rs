//! Database connection pool and migrations module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus the embedded migration set shared by server startup and the CLI.

mod pool;

pub use pool::{AsyncDbPool, establish_async_connection_pool};

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::error::{AppError, AppResult};

/// All migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration and return the names of the ones that ran.
///
/// The migration harness drives a synchronous connection, so the work runs
/// on a blocking thread.
pub async fn run_pending_migrations(database_url: String) -> AppResult<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::anyhow!("Connection error: {}", e),
        })?;

        let applied =
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| AppError::Database {
                    operation: "run pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                })?;

        Ok::<_, AppError>(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
