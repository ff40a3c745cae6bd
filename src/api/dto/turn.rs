//! Turn-related DTOs for API requests and responses.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Barber, Client, Service, TurnWithRelations};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for booking or rescheduling a turn.
///
/// `date` is an epoch-millisecond timestamp. The reference fields keep the
/// camel-cased wire names the front end sends.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TurnRequest {
    /// Appointment instant as milliseconds since the Unix epoch
    #[schema(example = 1893456000000_i64)]
    pub date: i64,
    #[serde(rename = "idService")]
    #[validate(range(min = 1, message = "idService must be a positive integer"))]
    #[schema(minimum = 1)]
    pub id_service: i32,
    #[serde(rename = "idBarber")]
    #[validate(range(min = 1, message = "idBarber must be a positive integer"))]
    #[schema(minimum = 1)]
    pub id_barber: i32,
    #[serde(rename = "idClient")]
    #[validate(range(min = 1, message = "idClient must be a positive integer"))]
    #[schema(minimum = 1)]
    pub id_client: i32,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// A turn with its associations expanded, as returned by the read endpoints.
///
/// The raw foreign-key columns are not exposed; each reference appears as a
/// nested object instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct TurnDetail {
    pub id: i32,
    /// Appointment instant in RFC 3339 format
    #[schema(value_type = String, format = DateTime)]
    pub date: String,
    pub service: ServiceDetail,
    pub barber: BarberDetail,
    pub client: ClientDetail,
}

/// Service data embedded in a turn response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDetail {
    pub id: i32,
    pub name: String,
    /// Decimal price rendered as a string
    pub price: String,
    pub duration_minutes: i32,
}

/// Barber data embedded in a turn response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BarberDetail {
    pub id: i32,
    pub name: String,
}

/// Client data embedded in a turn response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDetail {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Service> for ServiceDetail {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            price: service.price.to_string(),
            duration_minutes: service.duration_minutes,
        }
    }
}

impl From<Barber> for BarberDetail {
    fn from(barber: Barber) -> Self {
        Self {
            id: barber.id,
            name: barber.name,
        }
    }
}

impl From<Client> for ClientDetail {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            email: client.email,
            phone: client.phone,
        }
    }
}

impl From<TurnWithRelations> for TurnDetail {
    fn from(row: TurnWithRelations) -> Self {
        Self {
            id: row.turn.id,
            date: row.turn.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            service: ServiceDetail::from(row.service),
            barber: BarberDetail::from(row.barber),
            client: ClientDetail::from(row.client),
        }
    }
}

/// Envelope for the turn list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TurnsResponse {
    pub turns: Vec<TurnDetail>,
}

/// Envelope for the single-turn endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TurnResponse {
    pub turn: TurnDetail,
}

/// Plain confirmation returned by the write endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
