//! Reservation service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::query::{Comparison, QueryParams, QueryPlan};
use crate::domain::reservation::{Reservation, ReservationId};
use crate::domain::storage::DocumentStore;
use crate::domain::table::{ChairId, TableId};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::infrastructure::listing::{DocumentPage, run_query};

/// Request for creating a reservation
#[derive(Debug, Clone)]
pub struct CreateReservationRequest {
    pub user_id: String,
    pub team_id: String,
    pub table_id: String,
    pub chair_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Request for updating a reservation; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateReservationRequest {
    pub table_id: Option<String>,
    pub chair_id: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Reservation service over the document store
#[derive(Debug, Clone)]
pub struct ReservationService {
    store: Arc<dyn DocumentStore<Reservation>>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn DocumentStore<Reservation>>) -> Self {
        Self { store }
    }

    /// Create a reservation
    pub async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation, DomainError> {
        let reservation = Reservation::new(
            ReservationId::generate(),
            UserId::new(&request.user_id)?,
            TeamId::new(&request.team_id)?,
            TableId::new(&request.table_id)?,
            ChairId::new(&request.chair_id)?,
            request.starts_at,
            request.ends_at,
        )?;

        self.store.create(reservation).await
    }

    /// Get a reservation by ID
    pub async fn get(&self, id: &str) -> Result<Option<Reservation>, DomainError> {
        let reservation_id =
            ReservationId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.get(&reservation_id).await
    }

    /// Run the query pipeline over reservations.
    ///
    /// The `from`/`to` parameters narrow to reservations starting at or
    /// after `from` and ending at or before `to`; they never become plain
    /// filter fields.
    pub async fn query(
        &self,
        params: &QueryParams,
        team_scope: Option<&TeamId>,
    ) -> Result<DocumentPage, DomainError> {
        let mut plan = QueryPlan::from_params(params);
        if let Some(team_id) = team_scope {
            plan = plan.scope_eq("team_id", team_id.as_str());
        }
        if let Some(from) = params.get("from") {
            plan.filter = plan.filter.with_cmp("starts_at", Comparison::Gte, from);
        }
        if let Some(to) = params.get("to") {
            plan.filter = plan.filter.with_cmp("ends_at", Comparison::Lte, to);
        }

        run_query(self.store.as_ref(), &plan, |reservation| {
            serde_json::to_value(reservation).unwrap_or(Value::Null)
        })
        .await
    }

    /// Update a reservation's window or seat
    pub async fn update(
        &self,
        id: &str,
        request: UpdateReservationRequest,
    ) -> Result<Reservation, DomainError> {
        let reservation_id =
            ReservationId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let chair_id = request.chair_id.as_deref().map(ChairId::new).transpose()?;
        let table_id = request.table_id.as_deref().map(TableId::new).transpose()?;

        let mut reservation = self
            .store
            .get(&reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Reservation '{}' not found", id)))?;

        reservation.reschedule(chair_id, table_id, request.starts_at, request.ends_at)?;

        self.store.update(reservation).await
    }

    /// Delete a reservation
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let reservation_id =
            ReservationId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.delete(&reservation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStore;
    use chrono::TimeZone;

    fn service() -> ReservationService {
        ReservationService::new(Arc::new(InMemoryStore::new()))
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    fn request(team: &str, day: u32) -> CreateReservationRequest {
        CreateReservationRequest {
            user_id: "user-1".to_string(),
            team_id: team.to_string(),
            table_id: "table-1".to_string(),
            chair_id: "chair-1".to_string(),
            starts_at: at(day, 9),
            ends_at: at(day, 17),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();

        let reservation = service.create(request("team-1", 5)).await.unwrap();

        let found = service.get(reservation.id().as_str()).await.unwrap();
        assert_eq!(found.unwrap().starts_at(), at(5, 9));
    }

    #[tokio::test]
    async fn test_create_inverted_range_rejected() {
        let service = service();

        let mut bad = request("team-1", 5);
        bad.ends_at = at(5, 8);

        let result = service.create(bad).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_query_from_to_narrowing() {
        let service = service();
        service.create(request("team-1", 1)).await.unwrap();
        service.create(request("team-1", 10)).await.unwrap();
        service.create(request("team-1", 20)).await.unwrap();

        let params = QueryParams::from_pairs([
            ("from", "2026-01-05T00:00:00Z"),
            ("to", "2026-01-15T00:00:00Z"),
        ]);

        let page = service.query(&params, None).await.unwrap();

        assert_eq!(page.count, 1);
        let starts_at: DateTime<Utc> = page.data[0]
            .get("starts_at")
            .and_then(|v| v.as_str())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(starts_at, at(10, 9));
    }

    #[tokio::test]
    async fn test_query_team_scope() {
        let service = service();
        service.create(request("team-1", 5)).await.unwrap();
        service.create(request("team-2", 5)).await.unwrap();

        let params = QueryParams::from_pairs(Vec::<(String, String)>::new());
        let team = TeamId::new("team-2").unwrap();

        let page = service.query(&params, Some(&team)).await.unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_update_reschedules() {
        let service = service();
        let reservation = service.create(request("team-1", 5)).await.unwrap();

        let updated = service
            .update(
                reservation.id().as_str(),
                UpdateReservationRequest {
                    starts_at: Some(at(6, 9)),
                    ends_at: Some(at(6, 17)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.starts_at(), at(6, 9));
    }

    #[tokio::test]
    async fn test_update_missing_reservation() {
        let service = service();

        let result = service
            .update("no-such-reservation", UpdateReservationRequest::default())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let reservation = service.create(request("team-1", 5)).await.unwrap();

        assert!(service.delete(reservation.id().as_str()).await.unwrap());
        assert!(!service.delete(reservation.id().as_str()).await.unwrap());
    }
}
