//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Settings, StorageBackend};
use crate::db::{self, establish_async_connection_pool};
use crate::repositories::{MemoryStore, Repositories};
use crate::services::Services;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Initializes the configured storage backend
    /// 3. Creates application state
    /// 4. Binds to the configured address
    /// 5. Runs the HTTP server with graceful shutdown
    ///
    /// # Errors
    /// - Storage initialization or migration errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        let (repos, db_pool) = match self.settings.storage.backend {
            StorageBackend::Postgres => {
                if self.settings.database.auto_migrate {
                    let applied =
                        db::run_pending_migrations(self.settings.database.url.clone()).await?;
                    tracing::info!(count = applied.len(), "Applied pending migrations");
                }

                tracing::info!(
                    max_connections = %self.settings.database.max_connections,
                    min_connections = %self.settings.database.min_connections,
                    "Initializing database connection pool"
                );
                let pool = establish_async_connection_pool(&self.settings.database).await?;
                tracing::info!("Database connection pool initialized");

                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage backend with seeded catalog");
                (Repositories::memory(Arc::new(MemoryStore::seeded())), None)
            }
        };

        let services = Services::new(repos);
        let settings = Arc::new(self.settings);
        let state = AppState::new(services, db_pool, Arc::clone(&settings));
        let router = create_router(state);
        tracing::info!("Router configured");

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// This function returns when either signal is received, allowing
/// the server to perform graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
