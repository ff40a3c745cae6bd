//! Turn booking request handlers.
//!
//! Thin HTTP adapters over `TurnService`: extract the payload, delegate,
//! and wrap the result in the wire envelopes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::api::doc::TURN_TAG;
use crate::api::dto::{
    ErrorResponse, MessageResponse, TurnDetail, TurnRequest, TurnResponse, TurnsResponse,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates turn-related routes.
///
/// Routes:
/// - GET /         - List all turns with expanded associations
/// - POST /        - Book a new turn
/// - GET /{id}     - Get a single turn
/// - PUT /{id}     - Replace a turn's date and references
/// - DELETE /{id}  - Cancel a turn
pub fn turn_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_turns).post(create_turn))
        .route("/{id}", get(get_turn).put(update_turn).delete(delete_turn))
}

/// POST /api/turns - Book a new turn.
#[utoipa::path(
    post,
    path = "/api/turns",
    request_body = TurnRequest,
    responses(
        (status = 200, description = "Turn created", body = MessageResponse),
        (status = 400, description = "Validation or booking-rule failure", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = TURN_TAG
)]
pub async fn create_turn(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TurnRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .services
        .turns
        .create_turn(
            payload.date,
            payload.id_service,
            payload.id_barber,
            payload.id_client,
        )
        .await?;
    Ok(Json(MessageResponse::new("Turn created")))
}

/// GET /api/turns - List all turns with their associations expanded.
#[utoipa::path(
    get,
    path = "/api/turns",
    responses(
        (status = 200, description = "All booked turns", body = TurnsResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = TURN_TAG
)]
pub async fn get_turns(State(state): State<AppState>) -> Result<Json<TurnsResponse>, AppError> {
    let rows = state.services.turns.get_turns().await?;
    let turns = rows.into_iter().map(TurnDetail::from).collect();
    Ok(Json(TurnsResponse { turns }))
}

/// GET /api/turns/{id} - Get a single turn.
#[utoipa::path(
    get,
    path = "/api/turns/{id}",
    params(("id" = i32, Path, description = "Turn identifier")),
    responses(
        (status = 200, description = "The requested turn", body = TurnResponse),
        (status = 400, description = "Turn not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = TURN_TAG
)]
pub async fn get_turn(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TurnResponse>, AppError> {
    let row = state.services.turns.get_turn(id).await?;
    Ok(Json(TurnResponse {
        turn: TurnDetail::from(row),
    }))
}

/// PUT /api/turns/{id} - Replace a turn's date and references.
#[utoipa::path(
    put,
    path = "/api/turns/{id}",
    params(("id" = i32, Path, description = "Turn identifier")),
    request_body = TurnRequest,
    responses(
        (status = 200, description = "Turn updated", body = MessageResponse),
        (status = 400, description = "Validation or booking-rule failure", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = TURN_TAG
)]
pub async fn update_turn(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<TurnRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .services
        .turns
        .update_turn(
            id,
            payload.date,
            payload.id_service,
            payload.id_barber,
            payload.id_client,
        )
        .await?;
    Ok(Json(MessageResponse::new("Turn updated")))
}

/// DELETE /api/turns/{id} - Cancel a turn.
#[utoipa::path(
    delete,
    path = "/api/turns/{id}",
    params(("id" = i32, Path, description = "Turn identifier")),
    responses(
        (status = 200, description = "Turn deleted", body = MessageResponse),
        (status = 400, description = "Turn not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = TURN_TAG
)]
pub async fn delete_turn(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state.services.turns.delete_turn(id).await?;
    Ok(Json(MessageResponse::new("Turn deleted")))
}
