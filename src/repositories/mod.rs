//! Repository layer for data access operations.
//!
//! Each entity is reached through its own trait so the booking logic can be
//! wired against any backend. Two implementations exist: the diesel_async
//! repositories over PostgreSQL and the in-process [`MemoryStore`].

mod barber_repo;
mod client_repo;
mod memory;
mod service_repo;
mod turn_repo;

pub use barber_repo::PgBarberRepository;
pub use client_repo::PgClientRepository;
pub use memory::MemoryStore;
pub use service_repo::PgServiceRepository;
pub use turn_repo::PgTurnRepository;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Barber, Client, NewTurn, Service, Turn, TurnWithRelations, UpdateTurn};

/// Client lookups.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>>;
}

/// Barber lookups.
#[async_trait]
pub trait BarberRepository: Send + Sync {
    async fn find_by_id(&self, barber_id: i32) -> AppResult<Option<Barber>>;
}

/// Service lookups.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, service_id: i32) -> AppResult<Option<Service>>;
}

/// Turn persistence operations.
#[async_trait]
pub trait TurnRepository: Send + Sync {
    async fn find_by_id(&self, turn_id: i32) -> AppResult<Option<Turn>>;

    /// Finds a turn occupying the exact timestamp, if any.
    async fn find_by_date(&self, turn_date: DateTime<Utc>) -> AppResult<Option<Turn>>;

    async fn create(&self, new_turn: NewTurn) -> AppResult<Turn>;

    /// Overwrites all four fields of an existing turn.
    async fn update(&self, turn_id: i32, changes: UpdateTurn) -> AppResult<Turn>;

    /// Deletes a turn, returning the number of affected rows (0 or 1).
    async fn delete(&self, turn_id: i32) -> AppResult<usize>;

    /// Lists every turn joined with its service, barber and client.
    async fn list_with_relations(&self) -> AppResult<Vec<TurnWithRelations>>;

    /// Finds a single turn joined with its service, barber and client.
    async fn find_with_relations(&self, turn_id: i32) -> AppResult<Option<TurnWithRelations>>;
}

/// Aggregates all repositories for convenient access.
///
/// This struct is designed to be injected into the service layer and carried
/// in the Axum application state. The trait objects are behind `Arc`, so
/// cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub barbers: Arc<dyn BarberRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub turns: Arc<dyn TurnRepository>,
}

impl Repositories {
    /// Creates repositories backed by the PostgreSQL connection pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            barbers: Arc::new(PgBarberRepository::new(pool.clone())),
            services: Arc::new(PgServiceRepository::new(pool.clone())),
            turns: Arc::new(PgTurnRepository::new(pool)),
        }
    }

    /// Creates repositories backed by a shared in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            clients: store.clone(),
            barbers: store.clone(),
            services: store.clone(),
            turns: store,
        }
    }
}
