//! Client repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Client;
use crate::repositories::ClientRepository;

/// Client lookups backed by the clients table.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment).
#[derive(Clone)]
pub struct PgClientRepository {
    pool: AsyncDbPool,
}

impl PgClientRepository {
    /// Creates a new PgClientRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        clients
            .filter(id.eq(client_id))
            .select(Client::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
