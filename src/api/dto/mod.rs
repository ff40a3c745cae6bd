//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `turn` - Turn booking request/response DTOs
//! - `error` - Common error response DTOs

mod error;
mod turn;

pub use error::ErrorResponse;
pub use turn::{
    BarberDetail, ClientDetail, MessageResponse, ServiceDetail, TurnDetail, TurnRequest,
    TurnResponse, TurnsResponse,
};
