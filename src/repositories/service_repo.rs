//! Service repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Service;
use crate::repositories::ServiceRepository;

/// Service lookups backed by the services table.
#[derive(Clone)]
pub struct PgServiceRepository {
    pool: AsyncDbPool,
}

impl PgServiceRepository {
    /// Creates a new PgServiceRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn find_by_id(&self, service_id: i32) -> AppResult<Option<Service>> {
        use crate::schema::services::dsl::*;
        let mut conn = self.pool.get().await?;

        services
            .filter(id.eq(service_id))
            .select(Service::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
