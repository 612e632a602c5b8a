//! Table and chair entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{TableValidationError, validate_chairs_count, validate_table_id};
use crate::domain::storage::{Document, DocumentKey};
use crate::domain::team::TeamId;

/// Table identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Result<Self, TableValidationError> {
        let id = id.into();
        validate_table_id(&id)?;
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

impl TryFrom<String> for TableId {
    type Error = TableValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableId> for String {
    fn from(id: TableId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for TableId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Chair identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChairId(String);

impl ChairId {
    pub fn new(id: impl Into<String>) -> Result<Self, TableValidationError> {
        let id = id.into();
        validate_table_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChairId {
    type Error = TableValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChairId> for String {
    fn from(id: ChairId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for ChairId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A bookable table belonging to a team.
///
/// Creating a table fans out one chair document per seat; deleting a table
/// removes its chairs as well. That orchestration lives in the table service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    team_id: TeamId,
    chairs_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Table {
    pub fn new(id: TableId, team_id: TeamId, chairs_count: u32) -> Result<Self, TableValidationError> {
        validate_chairs_count(chairs_count)?;
        let now = Utc::now();

        Ok(Self {
            id,
            team_id,
            chairs_count,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn chairs_count(&self) -> u32 {
        self.chairs_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Document for Table {
    type Key = TableId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    const COLLECTION: &'static str = "tables";
}

/// A single seat at a table, numbered from 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chair {
    id: ChairId,
    table_id: TableId,
    chair_number: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Chair {
    pub fn new(id: ChairId, table_id: TableId, chair_number: u32) -> Self {
        let now = Utc::now();

        Self {
            id,
            table_id,
            chair_number,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &ChairId {
        &self.id
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn chair_number(&self) -> u32 {
        self.chair_number
    }
}

impl Document for Chair {
    type Key = ChairId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    const COLLECTION: &'static str = "chairs";
}
