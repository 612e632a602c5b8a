//! Read-plan assembly and execution over serialized documents

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::DomainError;

use super::filter::QueryFilter;
use super::pagination::PaginationPlan;
use super::params::QueryParams;
use super::sort::{ProjectionSpec, SortSpec};

/// The store-facing half of a read: filter, order, window.
///
/// Projection is deliberately absent; it is applied to serialized documents
/// when the response envelope is built.
#[derive(Debug, Clone)]
pub struct ReadPlan {
    pub filter: QueryFilter,
    pub sort: SortSpec,
    pub offset: u64,
    pub limit: u64,
}

impl ReadPlan {
    pub fn new(filter: QueryFilter, sort: SortSpec, pagination: &PaginationPlan) -> Self {
        Self {
            filter,
            sort,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    /// Plan that returns every matching document in order.
    pub fn unbounded(filter: QueryFilter, sort: SortSpec) -> Self {
        Self {
            filter,
            sort,
            offset: 0,
            limit: u64::MAX,
        }
    }
}

/// A fully-specified read produced from one set of query parameters.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub filter: QueryFilter,
    pub sort: SortSpec,
    pub projection: ProjectionSpec,
    page: Option<String>,
    limit: Option<String>,
}

impl QueryPlan {
    /// Run the full translation pipeline over boundary parameters.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            filter: QueryFilter::translate(params),
            sort: SortSpec::parse(params.sort()),
            projection: ProjectionSpec::parse(params.select()),
            page: params.page().map(str::to_string),
            limit: params.limit().map(str::to_string),
        }
    }

    /// Narrow the filter with an extra equality condition.
    pub fn scope_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = self.filter.with_eq(field, value);
        self
    }

    /// Resolve pagination once the total matching count is known.
    pub fn paginate(&self, total: u64) -> PaginationPlan {
        PaginationPlan::plan(self.page.as_deref(), self.limit.as_deref(), total)
    }

    /// The read plan for a given pagination resolution.
    pub fn read_plan(&self, pagination: &PaginationPlan) -> ReadPlan {
        ReadPlan::new(self.filter.clone(), self.sort.clone(), pagination)
    }
}

/// Count the entities matching a filter.
pub fn count_matching<E: Serialize>(entities: &[E], filter: &QueryFilter) -> Result<u64, DomainError> {
    let mut count = 0;
    for entity in entities {
        let document = serde_json::to_value(entity)
            .map_err(|e| DomainError::internal(format!("Failed to serialize document: {}", e)))?;
        if filter.matches(&document) {
            count += 1;
        }
    }
    Ok(count)
}

/// Execute a read plan over in-process entities: filter, sort, window.
pub fn execute_plan<E>(entities: Vec<E>, plan: &ReadPlan) -> Result<Vec<E>, DomainError>
where
    E: Serialize + DeserializeOwned,
{
    let mut matched = Vec::new();
    for entity in entities {
        let document = serde_json::to_value(&entity)
            .map_err(|e| DomainError::internal(format!("Failed to serialize document: {}", e)))?;
        if plan.filter.matches(&document) {
            matched.push((document, entity));
        }
    }

    matched.sort_by(|(a, _), (b, _)| plan.sort.compare(a, b));

    let window = matched
        .into_iter()
        .skip(plan.offset as usize)
        .take(plan.limit.min(usize::MAX as u64) as usize)
        .map(|(_, entity)| entity)
        .collect();

    Ok(window)
}
