//! Team entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{TeamValidationError, validate_team_id, validate_team_name};
use crate::domain::storage::{Document, DocumentKey};

/// Team identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
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

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A team grouping users, tables and reservations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Document for Team {
    type Key = TeamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    const COLLECTION: &'static str = "teams";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team() {
        let team = Team::new(TeamId::new("team-1").unwrap(), "Engineering").unwrap();

        assert_eq!(team.id().as_str(), "team-1");
        assert_eq!(team.name(), "Engineering");
    }

    #[test]
    fn test_new_team_invalid_name() {
        assert!(Team::new(TeamId::new("team-1").unwrap(), "").is_err());
    }

    #[test]
    fn test_rename() {
        let mut team = Team::new(TeamId::new("team-1").unwrap(), "Engineering").unwrap();

        team.rename("Platform").unwrap();
        assert_eq!(team.name(), "Platform");

        assert!(team.rename("").is_err());
        assert_eq!(team.name(), "Platform");
    }
}
