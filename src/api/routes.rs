//! Router configuration for the API.
//!
//! Centralized route registration and middleware wiring for the
//! application.

use axum::{Json, Router, http::HeaderValue, http::StatusCode, middleware, routing::get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;

use crate::api::doc::ApiDoc;
use crate::api::dto::ErrorResponse;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::config::settings::CorsConfig;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Routes:
/// - `/api/turns` - Turn booking operations
/// - `/api/docs/openapi.json` - OpenAPI document
/// - `/health` - Health probe
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);

    let api_routes = Router::new()
        .nest("/turns", handlers::turns::turn_routes())
        .route("/docs/openapi.json", get(openapi_json));

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .fallback(not_found)
        .layer(cors)
        // Middleware is applied in reverse order - last added runs first,
        // so the request id is in place before the logging layer reads it.
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Serves the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// JSON fallback for unknown routes.
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "Resource not found")),
    )
}

/// Builds the CORS layer from configuration.
///
/// An empty origin list means any origin is accepted.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                    None
                }
            })
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
