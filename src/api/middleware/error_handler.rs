//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError so handlers can return
//! `AppResult<T>` directly. Every business-rule failure renders as 400 with
//! its exact client-facing message; infrastructure failures are logged with
//! their source detail and collapse to an opaque 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Client-facing text for any infrastructure failure.
const SERVER_ERROR_MESSAGE: &str = "There was a server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(code, &self.to_string())
                    .with_details(json!({ "fields": errors }))
            }
            AppError::BadRequest { message } => ErrorResponse::new(code, message),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "database failure");
                ErrorResponse::new(code, SERVER_ERROR_MESSAGE)
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "configuration failure");
                ErrorResponse::new(code, SERVER_ERROR_MESSAGE)
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = ?source, "connection pool failure");
                ErrorResponse::new(code, SERVER_ERROR_MESSAGE)
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "internal failure");
                ErrorResponse::new(code, SERVER_ERROR_MESSAGE)
            }
            // Business-rule variants carry their client-facing text as Display.
            other => ErrorResponse::new(code, &other.to_string()),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its HTTP status code.
///
/// Business-rule violations are all client errors the caller can correct,
/// including a missing turn, so they share status 400.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::InvalidDate
        | AppError::ServiceNotFound
        | AppError::BarberNotFound
        | AppError::ClientNotFound
        | AppError::DateConflict
        | AppError::TurnNotFound
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its stable machine code.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidDate => "INVALID_DATE",
        AppError::ServiceNotFound => "SERVICE_NOT_FOUND",
        AppError::BarberNotFound => "BARBER_NOT_FOUND",
        AppError::ClientNotFound => "CLIENT_NOT_FOUND",
        AppError::DateConflict => "DATE_CONFLICT",
        AppError::TurnNotFound => "TURN_NOT_FOUND",
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "CONNECTION_POOL_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    async fn response_body(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_business_errors_map_to_bad_request() {
        let cases = [
            AppError::InvalidDate,
            AppError::ServiceNotFound,
            AppError::BarberNotFound,
            AppError::ClientNotFound,
            AppError::DateConflict,
            AppError::TurnNotFound,
        ];

        for error in cases {
            assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_infrastructure_errors_map_to_internal_server_error() {
        let cases = [
            AppError::Database {
                operation: "insert turn".to_string(),
                source: anyhow::anyhow!("connection reset"),
            },
            AppError::Configuration {
                key: "database.url".to_string(),
                source: anyhow::anyhow!("missing"),
            },
            AppError::ConnectionPool {
                source: anyhow::anyhow!("pool exhausted"),
            },
            AppError::Internal {
                source: anyhow::anyhow!("lock poisoned"),
            },
        ];

        for error in cases {
            assert_eq!(
                error_to_status_code(&error),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(error_to_code(&AppError::InvalidDate), "INVALID_DATE");
        assert_eq!(error_to_code(&AppError::DateConflict), "DATE_CONFLICT");
        assert_eq!(error_to_code(&AppError::TurnNotFound), "TURN_NOT_FOUND");
        assert_eq!(
            error_to_code(&AppError::BadRequest {
                message: "bad".to_string()
            }),
            "BAD_REQUEST"
        );
    }

    #[tokio::test]
    async fn test_invalid_date_renders_exact_message() {
        let (status, body) = response_body(AppError::InvalidDate).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_DATE");
        assert_eq!(body["message"], "The date must be today or a future date");
    }

    #[tokio::test]
    async fn test_turn_not_found_is_bad_request_not_404() {
        let (status, body) = response_body(AppError::TurnNotFound).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Turn not found");
    }

    #[tokio::test]
    async fn test_date_conflict_renders_exact_message() {
        let (status, body) = response_body(AppError::DateConflict).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "There is a turn in the same date");
    }

    #[tokio::test]
    async fn test_catalog_errors_render_exact_messages() {
        let (_, body) = response_body(AppError::ServiceNotFound).await;
        assert_eq!(body["message"], "Service not found");

        let (_, body) = response_body(AppError::BarberNotFound).await;
        assert_eq!(body["message"], "Barber not found");

        let (_, body) = response_body(AppError::ClientNotFound).await;
        assert_eq!(body["message"], "Client not found");
    }

    #[tokio::test]
    async fn test_validation_errors_include_field_details() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "id_service".to_string(),
                message: "idService must be a positive integer".to_string(),
            }],
        };

        let (status, body) = response_body(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "id_service");
    }

    #[tokio::test]
    async fn test_store_failure_is_opaque() {
        let error = AppError::Database {
            operation: "select turns".to_string(),
            source: anyhow::anyhow!("password authentication failed for user"),
        };

        let (status, body) = response_body(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "There was a server error");
        let rendered = body.to_string();
        assert!(!rendered.contains("password"));
        assert!(!rendered.contains("select turns"));
    }
}
