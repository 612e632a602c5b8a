//! Team service

use std::sync::Arc;

use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::query::{QueryParams, QueryPlan};
use crate::domain::storage::DocumentStore;
use crate::domain::team::{Team, TeamId};
use crate::infrastructure::listing::{DocumentPage, run_query};

/// Team service over the document store
#[derive(Debug, Clone)]
pub struct TeamService {
    store: Arc<dyn DocumentStore<Team>>,
}

impl TeamService {
    pub fn new(store: Arc<dyn DocumentStore<Team>>) -> Self {
        Self { store }
    }

    /// Create a new team
    pub async fn create(&self, name: &str) -> Result<Team, DomainError> {
        let team = Team::new(TeamId::generate(), name)?;
        self.store.create(team).await
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.get(&team_id).await
    }

    /// Run the query pipeline over teams
    pub async fn query(&self, params: &QueryParams) -> Result<DocumentPage, DomainError> {
        let plan = QueryPlan::from_params(params);

        run_query(self.store.as_ref(), &plan, |team| {
            serde_json::to_value(team).unwrap_or(Value::Null)
        })
        .await
    }

    /// Rename a team
    pub async fn rename(&self, id: &str, name: &str) -> Result<Team, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut team = self
            .store
            .get(&team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        team.rename(name)?;
        self.store.update(team).await
    }

    /// Delete a team
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.delete(&team_id).await
    }
}
