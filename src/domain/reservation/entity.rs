//! Reservation entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    ReservationValidationError, validate_reservation_id, validate_time_range,
};
use crate::domain::storage::{Document, DocumentKey};
use crate::domain::table::{ChairId, TableId};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Reservation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new(id: impl Into<String>) -> Result<Self, ReservationValidationError> {
        let id = id.into();
        validate_reservation_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReservationId {
    type Error = ReservationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReservationId> for String {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for ReservationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A chair booked by a user for a time window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    user_id: UserId,
    team_id: TeamId,
    table_id: TableId,
    chair_id: ChairId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReservationId,
        user_id: UserId,
        team_id: TeamId,
        table_id: TableId,
        chair_id: ChairId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, ReservationValidationError> {
        validate_time_range(starts_at, ends_at)?;
        let now = Utc::now();

        Ok(Self {
            id,
            user_id,
            team_id,
            table_id,
            chair_id,
            starts_at,
            ends_at,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn chair_id(&self) -> &ChairId {
        &self.chair_id
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move the reservation to a new window and, optionally, a new seat
    pub fn reschedule(
        &mut self,
        chair_id: Option<ChairId>,
        table_id: Option<TableId>,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<(), ReservationValidationError> {
        let starts_at = starts_at.unwrap_or(self.starts_at);
        let ends_at = ends_at.unwrap_or(self.ends_at);
        validate_time_range(starts_at, ends_at)?;

        if let Some(chair_id) = chair_id {
            self.chair_id = chair_id;
        }
        if let Some(table_id) = table_id {
            self.table_id = table_id;
        }
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self.updated_at = Utc::now();

        Ok(())
    }
}

impl Document for Reservation {
    type Key = ReservationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    const COLLECTION: &'static str = "reservations";
}
