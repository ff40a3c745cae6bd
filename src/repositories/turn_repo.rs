//! Turn repository for async database operations.
//!
//! Provides CRUD operations for the turns table using diesel_async, plus
//! joined reads that expand the service, barber and client associations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Barber, Client, NewTurn, Service, Turn, TurnWithRelations, UpdateTurn};
use crate::repositories::TurnRepository;

/// Turn persistence backed by the turns table.
///
/// The unique constraint on `turns.date` is what actually guarantees the
/// no-two-turns-per-timestamp rule under concurrent requests; the violation
/// surfaces as `AppError::DateConflict` through the error converter.
#[derive(Clone)]
pub struct PgTurnRepository {
    pool: AsyncDbPool,
}

impl PgTurnRepository {
    /// Creates a new PgTurnRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TurnRepository for PgTurnRepository {
    async fn find_by_id(&self, turn_id: i32) -> AppResult<Option<Turn>> {
        use crate::schema::turns::dsl::*;
        let mut conn = self.pool.get().await?;

        turns
            .filter(id.eq(turn_id))
            .select(Turn::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_date(&self, turn_date: DateTime<Utc>) -> AppResult<Option<Turn>> {
        use crate::schema::turns::dsl::*;
        let mut conn = self.pool.get().await?;

        turns
            .filter(date.eq(turn_date))
            .select(Turn::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn create(&self, new_turn: NewTurn) -> AppResult<Turn> {
        use crate::schema::turns::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(turns)
            .values(&new_turn)
            .returning(Turn::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, turn_id: i32, changes: UpdateTurn) -> AppResult<Turn> {
        use crate::schema::turns::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(turns.filter(id.eq(turn_id)))
            .set(&changes)
            .returning(Turn::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, turn_id: i32) -> AppResult<usize> {
        use crate::schema::turns::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(turns.filter(id.eq(turn_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_with_relations(&self) -> AppResult<Vec<TurnWithRelations>> {
        use crate::schema::{barbers, clients, services, turns};
        let mut conn = self.pool.get().await?;

        let rows: Vec<(Turn, Service, Barber, Client)> = turns::table
            .inner_join(services::table)
            .inner_join(barbers::table)
            .inner_join(clients::table)
            .select((
                Turn::as_select(),
                Service::as_select(),
                Barber::as_select(),
                Client::as_select(),
            ))
            .order(turns::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(TurnWithRelations::from).collect())
    }

    async fn find_with_relations(&self, turn_id: i32) -> AppResult<Option<TurnWithRelations>> {
        use crate::schema::{barbers, clients, services, turns};
        let mut conn = self.pool.get().await?;

        let row: Option<(Turn, Service, Barber, Client)> = turns::table
            .inner_join(services::table)
            .inner_join(barbers::table)
            .inner_join(clients::table)
            .filter(turns::id.eq(turn_id))
            .select((
                Turn::as_select(),
                Service::as_select(),
                Barber::as_select(),
                Client::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(row.map(TurnWithRelations::from))
    }
}
