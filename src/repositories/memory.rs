//! In-process storage backend.
//!
//! Keeps the catalog and turns in plain maps behind `RwLock`s. Selected with
//! `storage.backend = "memory"`, which is what the test environment and local
//! demos run against; postgres is the production path.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{Barber, Client, NewTurn, Service, Turn, TurnWithRelations, UpdateTurn};
use crate::repositories::{BarberRepository, ClientRepository, ServiceRepository, TurnRepository};

/// Shared in-memory tables.
///
/// The catalog (clients, barbers, services) is fixed at construction time;
/// only turns are written at runtime.
pub struct MemoryStore {
    clients: RwLock<HashMap<i32, Client>>,
    barbers: RwLock<HashMap<i32, Barber>>,
    services: RwLock<HashMap<i32, Service>>,
    turns: RwLock<HashMap<i32, Turn>>,
    next_turn_id: AtomicI32,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            barbers: RwLock::new(HashMap::new()),
            services: RwLock::new(HashMap::new()),
            turns: RwLock::new(HashMap::new()),
            next_turn_id: AtomicI32::new(1),
        }
    }

    /// Creates a store pre-loaded with a small demo catalog.
    ///
    /// Ids are stable (1-based in insertion order) so demo requests and
    /// integration tests can reference them directly.
    pub fn seeded() -> Self {
        let services = HashMap::from([
            (
                1,
                Service {
                    id: 1,
                    name: "Corte clásico".to_string(),
                    price: BigDecimal::from(1500),
                    duration_minutes: 30,
                },
            ),
            (
                2,
                Service {
                    id: 2,
                    name: "Corte y barba".to_string(),
                    price: BigDecimal::from(2200),
                    duration_minutes: 45,
                },
            ),
            (
                3,
                Service {
                    id: 3,
                    name: "Afeitado clásico".to_string(),
                    price: BigDecimal::from(900),
                    duration_minutes: 20,
                },
            ),
        ]);

        let barbers = HashMap::from([
            (
                1,
                Barber {
                    id: 1,
                    name: "Martín Suárez".to_string(),
                },
            ),
            (
                2,
                Barber {
                    id: 2,
                    name: "Lucas Pereyra".to_string(),
                },
            ),
        ]);

        let clients = HashMap::from([
            (
                1,
                Client {
                    id: 1,
                    name: "Juan Pérez".to_string(),
                    email: "juan.perez@example.com".to_string(),
                    phone: "+54 9 11 5555-1111".to_string(),
                },
            ),
            (
                2,
                Client {
                    id: 2,
                    name: "Diego Fernández".to_string(),
                    email: "diego.fernandez@example.com".to_string(),
                    phone: "+54 9 11 5555-2222".to_string(),
                },
            ),
        ]);

        Self {
            clients: RwLock::new(clients),
            barbers: RwLock::new(barbers),
            services: RwLock::new(services),
            turns: RwLock::new(HashMap::new()),
            next_turn_id: AtomicI32::new(1),
        }
    }

    /// Verifies the catalog rows a turn references exist, mirroring the
    /// foreign key constraints of the postgres backend.
    fn check_references(
        &self,
        service_id: i32,
        barber_id: i32,
        client_id: i32,
    ) -> AppResult<()> {
        if !self
            .services
            .read()
            .map_err(lock_poisoned)?
            .contains_key(&service_id)
        {
            return Err(AppError::ServiceNotFound);
        }
        if !self
            .barbers
            .read()
            .map_err(lock_poisoned)?
            .contains_key(&barber_id)
        {
            return Err(AppError::BarberNotFound);
        }
        if !self
            .clients
            .read()
            .map_err(lock_poisoned)?
            .contains_key(&client_id)
        {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned<T>(e: std::sync::PoisonError<T>) -> AppError {
    AppError::Internal {
        source: anyhow::anyhow!("memory store lock poisoned: {}", e),
    }
}

fn missing_reference(entity: &str, id: i32) -> AppError {
    AppError::Internal {
        source: anyhow::anyhow!("turn references missing {} {}", entity, id),
    }
}

fn join_relations(
    turn: &Turn,
    services: &HashMap<i32, Service>,
    barbers: &HashMap<i32, Barber>,
    clients: &HashMap<i32, Client>,
) -> AppResult<TurnWithRelations> {
    let service = services
        .get(&turn.service_id)
        .cloned()
        .ok_or_else(|| missing_reference("service", turn.service_id))?;
    let barber = barbers
        .get(&turn.barber_id)
        .cloned()
        .ok_or_else(|| missing_reference("barber", turn.barber_id))?;
    let client = clients
        .get(&turn.client_id)
        .cloned()
        .ok_or_else(|| missing_reference("client", turn.client_id))?;

    Ok(TurnWithRelations {
        turn: turn.clone(),
        service,
        barber,
        client,
    })
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>> {
        let clients = self.clients.read().map_err(lock_poisoned)?;
        Ok(clients.get(&client_id).cloned())
    }
}

#[async_trait]
impl BarberRepository for MemoryStore {
    async fn find_by_id(&self, barber_id: i32) -> AppResult<Option<Barber>> {
        let barbers = self.barbers.read().map_err(lock_poisoned)?;
        Ok(barbers.get(&barber_id).cloned())
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn find_by_id(&self, service_id: i32) -> AppResult<Option<Service>> {
        let services = self.services.read().map_err(lock_poisoned)?;
        Ok(services.get(&service_id).cloned())
    }
}

#[async_trait]
impl TurnRepository for MemoryStore {
    async fn find_by_id(&self, turn_id: i32) -> AppResult<Option<Turn>> {
        let turns = self.turns.read().map_err(lock_poisoned)?;
        Ok(turns.get(&turn_id).cloned())
    }

    async fn find_by_date(&self, turn_date: DateTime<Utc>) -> AppResult<Option<Turn>> {
        let turns = self.turns.read().map_err(lock_poisoned)?;
        Ok(turns.values().find(|t| t.date == turn_date).cloned())
    }

    async fn create(&self, new_turn: NewTurn) -> AppResult<Turn> {
        self.check_references(new_turn.service_id, new_turn.barber_id, new_turn.client_id)?;

        let mut turns = self.turns.write().map_err(lock_poisoned)?;

        // Duplicate check and insert happen under one write lock, which is
        // this backend's equivalent of the unique constraint on turns.date.
        if turns.values().any(|t| t.date == new_turn.date) {
            return Err(AppError::DateConflict);
        }

        let id = self.next_turn_id.fetch_add(1, Ordering::SeqCst);
        let turn = Turn {
            id,
            date: new_turn.date,
            service_id: new_turn.service_id,
            barber_id: new_turn.barber_id,
            client_id: new_turn.client_id,
        };
        turns.insert(id, turn.clone());
        Ok(turn)
    }

    async fn update(&self, turn_id: i32, changes: UpdateTurn) -> AppResult<Turn> {
        self.check_references(changes.service_id, changes.barber_id, changes.client_id)?;

        let mut turns = self.turns.write().map_err(lock_poisoned)?;

        // A turn may keep its own date; only another turn on the same
        // timestamp is a conflict.
        if turns
            .values()
            .any(|t| t.date == changes.date && t.id != turn_id)
        {
            return Err(AppError::DateConflict);
        }

        let turn = turns.get_mut(&turn_id).ok_or(AppError::TurnNotFound)?;
        turn.date = changes.date;
        turn.service_id = changes.service_id;
        turn.barber_id = changes.barber_id;
        turn.client_id = changes.client_id;
        Ok(turn.clone())
    }

    async fn delete(&self, turn_id: i32) -> AppResult<usize> {
        let mut turns = self.turns.write().map_err(lock_poisoned)?;
        Ok(if turns.remove(&turn_id).is_some() { 1 } else { 0 })
    }

    async fn list_with_relations(&self) -> AppResult<Vec<TurnWithRelations>> {
        let turns = self.turns.read().map_err(lock_poisoned)?;
        let services = self.services.read().map_err(lock_poisoned)?;
        let barbers = self.barbers.read().map_err(lock_poisoned)?;
        let clients = self.clients.read().map_err(lock_poisoned)?;

        let mut rows = Vec::with_capacity(turns.len());
        for turn in turns.values() {
            rows.push(join_relations(turn, &services, &barbers, &clients)?);
        }
        rows.sort_by_key(|row| row.turn.id);
        Ok(rows)
    }

    async fn find_with_relations(&self, turn_id: i32) -> AppResult<Option<TurnWithRelations>> {
        let turns = self.turns.read().map_err(lock_poisoned)?;
        let Some(turn) = turns.get(&turn_id) else {
            return Ok(None);
        };

        let services = self.services.read().map_err(lock_poisoned)?;
        let barbers = self.barbers.read().map_err(lock_poisoned)?;
        let clients = self.clients.read().map_err(lock_poisoned)?;

        join_relations(turn, &services, &barbers, &clients).map(Some)
    }
}
