//! Barber repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Barber;
use crate::repositories::BarberRepository;

/// Barber lookups backed by the barbers table.
#[derive(Clone)]
pub struct PgBarberRepository {
    pool: AsyncDbPool,
}

impl PgBarberRepository {
    /// Creates a new PgBarberRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarberRepository for PgBarberRepository {
    async fn find_by_id(&self, barber_id: i32) -> AppResult<Option<Barber>> {
        use crate::schema::barbers::dsl::*;
        let mut conn = self.pool.get().await?;

        barbers
            .filter(id.eq(barber_id))
            .select(Barber::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
