use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;

/// A single field failure reported by request body validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Business-rule variants carry the exact client-facing message as their
/// `Display` text; the HTTP layer serves all of them with status 400. The
/// remaining variants are system failures that collapse to an opaque 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Turn date is not strictly in the future
    #[error("The date must be today or a future date")]
    InvalidDate,

    /// Referenced service does not exist
    #[error("Service not found")]
    ServiceNotFound,

    /// Referenced barber does not exist
    #[error("Barber not found")]
    BarberNotFound,

    /// Referenced client does not exist
    #[error("Client not found")]
    ClientNotFound,

    /// Another turn already occupies the exact same timestamp
    #[error("There is a turn in the same date")]
    DateConflict,

    /// Requested turn does not exist
    #[error("Turn not found")]
    TurnNotFound,

    /// Request body failed field validation
    #[error("Validation failed")]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Malformed request that could not be deserialized
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| ValidationFieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Validation failed: {}", error.code)),
                })
            })
            .collect();
        AppError::ValidationErrors { errors }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(error: crate::config::ConfigError) -> Self {
        let key = match &error {
            crate::config::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
