//! Application state for Axum handlers.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap: services, pool, and settings are all Arc-backed.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool, present only for the postgres backend
    pub db_pool: Option<AsyncDbPool>,
    /// Effective application settings
    pub settings: Arc<Settings>,
    /// Boot instant, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState from already-constructed services.
    ///
    /// The storage backend decides whether a pool is present; the memory
    /// backend passes `None`.
    pub fn new(services: Services, db_pool: Option<AsyncDbPool>, settings: Arc<Settings>) -> Self {
        Self {
            services,
            db_pool,
            settings,
            started_at: Instant::now(),
        }
    }
}
