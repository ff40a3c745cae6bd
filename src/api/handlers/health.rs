//! Health check endpoint handlers.
//!
//! Provides a single `/health` probe for monitoring and load balancers.
//! The storage check goes straight to the connection pool; the in-memory
//! backend has no connection to probe and reports healthy.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::doc::HEALTH_TAG;
use crate::state::AppState;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application name
    pub name: String,
    /// Application version
    pub version: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Detailed checks for individual components
    pub checks: HashMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional message with details
    pub message: Option<String>,
    /// Probe duration in milliseconds
    pub response_time_ms: Option<u64>,
}

/// Creates health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Liveness plus storage connectivity probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;
    let overall = match storage.status {
        HealthStatus::Healthy => HealthStatus::Healthy,
        HealthStatus::Unhealthy => HealthStatus::Unhealthy,
    };

    let mut checks = HashMap::new();
    checks.insert("storage".to_string(), storage);

    let status_code = match overall {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status: overall,
        name: state.settings.application.name.clone(),
        version: state.settings.application.version.clone(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        checks,
    };

    (status_code, Json(response))
}

/// Probes the storage backend.
///
/// For the postgres backend this runs `SELECT 1` through the pool; the
/// memory backend always answers and reports healthy without a probe.
async fn check_storage(state: &AppState) -> ComponentHealth {
    let Some(pool) = &state.db_pool else {
        return ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("in-memory store".to_string()),
            response_time_ms: None,
        };
    };

    let start = Instant::now();
    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("connected".to_string()),
                    response_time_ms: Some(start.elapsed().as_millis() as u64),
                },
                Err(e) => ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some(format!("query failed: {}", e)),
                    response_time_ms: Some(start.elapsed().as_millis() as u64),
                },
            }
        }
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(format!("connection failed: {}", e)),
            response_time_ms: Some(start.elapsed().as_millis() as u64),
        },
    }
}
