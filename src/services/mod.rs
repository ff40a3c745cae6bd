//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod turn_service;

pub use turn_service::TurnService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the repositories are behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub turns: TurnService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            turns: TurnService::new(repos),
        }
    }
}
