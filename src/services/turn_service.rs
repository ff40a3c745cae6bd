//! Turn booking service.
//!
//! Holds the scheduling business rules: the future-date requirement, the
//! existence checks against the catalog, and exact-timestamp conflict
//! detection. Each operation runs its checks in a fixed order and fails on
//! the first violation.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{NewTurn, Turn, TurnWithRelations, UpdateTurn};
use crate::repositories::Repositories;

/// Booking operations over the injected repositories.
///
/// Cloning is cheap: `Repositories` holds its trait objects behind `Arc`.
#[derive(Clone)]
pub struct TurnService {
    repos: Repositories,
}

impl TurnService {
    /// Creates a new TurnService with the given repositories.
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Books a new turn.
    ///
    /// Checks run in order: date in the future, service exists, barber
    /// exists, client exists, timestamp free. The first failure wins.
    pub async fn create_turn(
        &self,
        date_ms: i64,
        service_id: i32,
        barber_id: i32,
        client_id: i32,
    ) -> AppResult<Turn> {
        let date = Self::validate_date(date_ms)?;
        self.check_catalog(service_id, barber_id, client_id).await?;

        if self.repos.turns.find_by_date(date).await?.is_some() {
            return Err(AppError::DateConflict);
        }

        // Two requests can both pass the check above before either writes.
        // The storage backend's uniqueness guarantee resolves that race and
        // surfaces here as DateConflict.
        let turn = self
            .repos
            .turns
            .create(NewTurn {
                date,
                service_id,
                barber_id,
                client_id,
            })
            .await?;

        tracing::info!(turn_id = turn.id, date = %turn.date, "turn created");
        Ok(turn)
    }

    /// Lists every turn with its expanded associations.
    pub async fn get_turns(&self) -> AppResult<Vec<TurnWithRelations>> {
        self.repos.turns.list_with_relations().await
    }

    /// Gets a single turn with its expanded associations.
    pub async fn get_turn(&self, turn_id: i32) -> AppResult<TurnWithRelations> {
        self.repos
            .turns
            .find_with_relations(turn_id)
            .await?
            .ok_or(AppError::TurnNotFound)
    }

    /// Replaces all four fields of an existing turn.
    ///
    /// Same checks as create, preceded by the turn-exists check. A turn
    /// keeping its own date is not a conflict.
    pub async fn update_turn(
        &self,
        turn_id: i32,
        date_ms: i64,
        service_id: i32,
        barber_id: i32,
        client_id: i32,
    ) -> AppResult<Turn> {
        let existing = self
            .repos
            .turns
            .find_by_id(turn_id)
            .await?
            .ok_or(AppError::TurnNotFound)?;

        let date = Self::validate_date(date_ms)?;
        self.check_catalog(service_id, barber_id, client_id).await?;

        if let Some(conflicting) = self.repos.turns.find_by_date(date).await? {
            if conflicting.id != existing.id {
                return Err(AppError::DateConflict);
            }
        }

        let turn = self
            .repos
            .turns
            .update(
                turn_id,
                UpdateTurn {
                    date,
                    service_id,
                    barber_id,
                    client_id,
                },
            )
            .await?;

        tracing::info!(turn_id = turn.id, date = %turn.date, "turn updated");
        Ok(turn)
    }

    /// Deletes a turn, freeing its timestamp.
    pub async fn delete_turn(&self, turn_id: i32) -> AppResult<()> {
        self.repos
            .turns
            .find_by_id(turn_id)
            .await?
            .ok_or(AppError::TurnNotFound)?;

        self.repos.turns.delete(turn_id).await?;

        tracing::info!(turn_id, "turn deleted");
        Ok(())
    }

    /// Converts the transport timestamp (epoch milliseconds) into a UTC
    /// date, rejecting values that are unrepresentable or not strictly in
    /// the future.
    fn validate_date(date_ms: i64) -> AppResult<DateTime<Utc>> {
        let date = DateTime::from_timestamp_millis(date_ms).ok_or(AppError::InvalidDate)?;
        if date <= Utc::now() {
            return Err(AppError::InvalidDate);
        }
        Ok(date)
    }

    /// Runs the catalog existence checks in the documented order:
    /// service, then barber, then client.
    async fn check_catalog(
        &self,
        service_id: i32,
        barber_id: i32,
        client_id: i32,
    ) -> AppResult<()> {
        if self.repos.services.find_by_id(service_id).await?.is_none() {
            return Err(AppError::ServiceNotFound);
        }
        if self.repos.barbers.find_by_id(barber_id).await?.is_none() {
            return Err(AppError::BarberNotFound);
        }
        if self.repos.clients.find_by_id(client_id).await?.is_none() {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use chrono::Duration;
    use std::sync::Arc;

    fn booking_service() -> TurnService {
        TurnService::new(Repositories::memory(Arc::new(MemoryStore::seeded())))
    }

    fn future_ms(days: i64) -> i64 {
        (Utc::now() + Duration::days(days)).timestamp_millis()
    }

    fn past_ms() -> i64 {
        (Utc::now() - Duration::days(1)).timestamp_millis()
    }

    #[tokio::test]
    async fn test_create_then_get_returns_matching_fields() {
        let service = booking_service();

        let created = service.create_turn(future_ms(1), 1, 2, 1).await.unwrap();
        let fetched = service.get_turn(created.id).await.unwrap();

        assert_eq!(fetched.turn.id, created.id);
        assert_eq!(fetched.turn.date, created.date);
        assert_eq!(fetched.service.id, 1);
        assert_eq!(fetched.barber.id, 2);
        assert_eq!(fetched.client.id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_past_date() {
        let service = booking_service();

        let result = service.create_turn(past_ms(), 1, 1, 1).await;
        assert!(matches!(result, Err(AppError::InvalidDate)));

        // No write happened
        assert!(service.get_turns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_current_instant() {
        let service = booking_service();

        let result = service
            .create_turn(Utc::now().timestamp_millis(), 1, 1, 1)
            .await;
        assert!(matches!(result, Err(AppError::InvalidDate)));
    }

    #[tokio::test]
    async fn test_create_rejects_unrepresentable_timestamp() {
        let service = booking_service();

        let result = service.create_turn(i64::MAX, 1, 1, 1).await;
        assert!(matches!(result, Err(AppError::InvalidDate)));
    }

    #[tokio::test]
    async fn test_create_checks_catalog_in_order() {
        let service = booking_service();

        let result = service.create_turn(future_ms(1), 99, 99, 99).await;
        assert!(matches!(result, Err(AppError::ServiceNotFound)));

        let result = service.create_turn(future_ms(1), 1, 99, 99).await;
        assert!(matches!(result, Err(AppError::BarberNotFound)));

        let result = service.create_turn(future_ms(1), 1, 1, 99).await;
        assert!(matches!(result, Err(AppError::ClientNotFound)));
    }

    #[tokio::test]
    async fn test_date_check_precedes_catalog_checks() {
        let service = booking_service();

        // Past date and unknown service: the date failure wins.
        let result = service.create_turn(past_ms(), 99, 99, 99).await;
        assert!(matches!(result, Err(AppError::InvalidDate)));
    }

    #[tokio::test]
    async fn test_create_rejects_occupied_date() {
        let service = booking_service();
        let date = future_ms(1);

        service.create_turn(date, 1, 1, 1).await.unwrap();
        let result = service.create_turn(date, 2, 2, 2).await;

        assert!(matches!(result, Err(AppError::DateConflict)));
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_write() {
        let service = booking_service();

        let _ = service.create_turn(future_ms(1), 99, 1, 1).await;
        assert!(service.get_turns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_turns_empty() {
        let service = booking_service();
        assert!(service.get_turns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_turn_missing() {
        let service = booking_service();
        let result = service.get_turn(42).await;
        assert!(matches!(result, Err(AppError::TurnNotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_turn_checked_first() {
        let service = booking_service();

        // Even with an invalid date, the turn-exists check runs first.
        let result = service.update_turn(42, past_ms(), 1, 1, 1).await;
        assert!(matches!(result, Err(AppError::TurnNotFound)));
    }

    #[tokio::test]
    async fn test_update_rejects_past_date() {
        let service = booking_service();
        let created = service.create_turn(future_ms(1), 1, 1, 1).await.unwrap();

        let result = service.update_turn(created.id, past_ms(), 1, 1, 1).await;
        assert!(matches!(result, Err(AppError::InvalidDate)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_date_without_conflict() {
        let service = booking_service();
        let date = future_ms(1);
        let created = service.create_turn(date, 1, 1, 1).await.unwrap();

        let updated = service.update_turn(created.id, date, 2, 2, 2).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.service_id, 2);
        assert_eq!(updated.barber_id, 2);
        assert_eq!(updated.client_id, 2);
    }

    #[tokio::test]
    async fn test_update_rejects_another_turns_date() {
        let service = booking_service();
        let first_date = future_ms(1);
        service.create_turn(first_date, 1, 1, 1).await.unwrap();
        let second = service.create_turn(future_ms(2), 2, 2, 2).await.unwrap();

        let result = service.update_turn(second.id, first_date, 2, 2, 2).await;
        assert!(matches!(result, Err(AppError::DateConflict)));
    }

    #[tokio::test]
    async fn test_update_frees_previous_slot() {
        // Create A at T+1, fail to create B at T+1, move A to T+2, then
        // creating at T+1 succeeds again.
        let service = booking_service();
        let slot = future_ms(1);

        let turn_a = service.create_turn(slot, 1, 1, 1).await.unwrap();

        let conflict = service.create_turn(slot, 2, 2, 2).await;
        assert!(matches!(conflict, Err(AppError::DateConflict)));

        service
            .update_turn(turn_a.id, future_ms(2), 1, 1, 1)
            .await
            .unwrap();

        let turn_c = service.create_turn(slot, 2, 2, 2).await;
        assert!(turn_c.is_ok());
    }

    #[tokio::test]
    async fn test_delete_then_get_fails() {
        let service = booking_service();
        let created = service.create_turn(future_ms(1), 1, 1, 1).await.unwrap();

        service.delete_turn(created.id).await.unwrap();

        let result = service.get_turn(created.id).await;
        assert!(matches!(result, Err(AppError::TurnNotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_turn() {
        let service = booking_service();
        let result = service.delete_turn(42).await;
        assert!(matches!(result, Err(AppError::TurnNotFound)));
    }
}
