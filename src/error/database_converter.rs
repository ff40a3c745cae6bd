use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations raised by the schema are translated back into the
/// business error the validation chain would have produced: a unique
/// violation on the turn date column becomes `DateConflict`, and a foreign
/// key violation on one of the reference columns becomes the matching
/// not-found error. This keeps the client-visible behavior identical whether
/// a conflicting write loses the validation check or loses the race to the
/// constraint.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    ///
    /// # Returns
    /// An AppError variant appropriate for the type of database error
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            // Lookups go through .optional(), so a bare NotFound only occurs
            // when a row disappears between a find and the write that follows
            DieselError::NotFound => AppError::TurnNotFound,
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let column = constraint_name
                    .and_then(ConstraintParser::parse_constraint_name)
                    .map(|(_, column)| column)
                    .or_else(|| {
                        ConstraintParser::extract_key_value_from_message(message)
                            .map(|(field, _)| field)
                    });

                match column.as_deref() {
                    Some("date") => AppError::DateConflict,
                    _ => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    },
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                let column = constraint_name
                    .and_then(ConstraintParser::parse_foreign_key_constraint_name)
                    .map(|(_, column)| column)
                    .or_else(|| {
                        ConstraintParser::extract_key_value_from_message(message)
                            .map(|(field, _)| field)
                    });

                match column.as_deref() {
                    Some("service_id") => AppError::ServiceNotFound,
                    Some("barber_id") => AppError::BarberNotFound,
                    Some("client_id") => AppError::ClientNotFound,
                    _ => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key constraint violation: {}",
                            message
                        )),
                    },
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }
}
