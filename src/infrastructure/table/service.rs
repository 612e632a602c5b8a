//! Table service with chair fan-out

use std::sync::Arc;

use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::query::{QueryFilter, QueryParams, QueryPlan, ReadPlan, SortSpec};
use crate::domain::storage::DocumentStore;
use crate::domain::table::{Chair, ChairId, Table, TableId};
use crate::domain::team::TeamId;
use crate::infrastructure::listing::{DocumentPage, run_query};

/// Table service over the document store.
///
/// Owns the chair collection too: creating a table fans out one chair per
/// seat, deleting a table removes them.
#[derive(Debug, Clone)]
pub struct TableService {
    tables: Arc<dyn DocumentStore<Table>>,
    chairs: Arc<dyn DocumentStore<Chair>>,
}

impl TableService {
    pub fn new(tables: Arc<dyn DocumentStore<Table>>, chairs: Arc<dyn DocumentStore<Chair>>) -> Self {
        Self { tables, chairs }
    }

    /// Create a table and its chairs, numbered 1..=chairs_count
    pub async fn create(&self, team_id: &str, chairs_count: u32) -> Result<Table, DomainError> {
        let team_id = TeamId::new(team_id)?;
        let table = Table::new(TableId::generate(), team_id, chairs_count)?;

        let table = self.tables.create(table).await?;

        for chair_number in 1..=chairs_count {
            let chair = Chair::new(ChairId::generate(), table.id().clone(), chair_number);
            self.chairs.create(chair).await?;
        }

        Ok(table)
    }

    /// Get a table by ID
    pub async fn get(&self, id: &str) -> Result<Option<Table>, DomainError> {
        let table_id = TableId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.tables.get(&table_id).await
    }

    /// Run the query pipeline over tables, optionally scoped to one team
    pub async fn query(
        &self,
        params: &QueryParams,
        team_scope: Option<&TeamId>,
    ) -> Result<DocumentPage, DomainError> {
        let mut plan = QueryPlan::from_params(params);
        if let Some(team_id) = team_scope {
            plan = plan.scope_eq("team_id", team_id.as_str());
        }

        run_query(self.tables.as_ref(), &plan, |table| {
            serde_json::to_value(table).unwrap_or(Value::Null)
        })
        .await
    }

    /// Chairs of a table, in seat order
    pub async fn chairs(&self, table_id: &str) -> Result<Vec<Chair>, DomainError> {
        let table_id = TableId::new(table_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if !self.tables.exists(&table_id).await? {
            return Err(DomainError::not_found(format!(
                "Table '{}' not found",
                table_id
            )));
        }

        let plan = ReadPlan::unbounded(
            QueryFilter::new().with_eq("table_id", table_id.as_str()),
            SortSpec::parse(Some("chair_number")),
        );
        self.chairs.find(&plan).await
    }

    /// Resize a table, recreating its chairs to match the new count
    pub async fn resize(&self, id: &str, chairs_count: u32) -> Result<Table, DomainError> {
        let table_id = TableId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let table = self
            .tables
            .get(&table_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Table '{}' not found", id)))?;

        let replacement = Table::new(
            table.id().clone(),
            table.team_id().clone(),
            chairs_count,
        )?;

        self.delete_chairs_of(&table_id).await?;
        for chair_number in 1..=chairs_count {
            let chair = Chair::new(ChairId::generate(), table_id.clone(), chair_number);
            self.chairs.create(chair).await?;
        }

        self.tables.update(replacement).await
    }

    /// Delete a table and cascade to its chairs
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let table_id = TableId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if !self.tables.delete(&table_id).await? {
            return Ok(false);
        }

        self.delete_chairs_of(&table_id).await?;
        Ok(true)
    }

    async fn delete_chairs_of(&self, table_id: &TableId) -> Result<(), DomainError> {
        let plan = ReadPlan::unbounded(
            QueryFilter::new().with_eq("table_id", table_id.as_str()),
            SortSpec::parse(None),
        );

        for chair in self.chairs.find(&plan).await? {
            self.chairs.delete(chair.id()).await?;
        }

        Ok(())
    }
}
