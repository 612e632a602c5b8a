//! Shared query-pipeline execution for list endpoints

use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::query::{PaginationPlan, QueryPlan};
use crate::domain::storage::{Document, DocumentStore};

/// One page of projected documents plus pagination markers
#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub data: Vec<Value>,
    pub count: u64,
    pub pagination: PaginationPlan,
}

/// Run a query plan against a store: count, paginate, fetch, project.
///
/// `to_document` controls serialization so entities can redact fields
/// before projection is applied.
pub async fn run_query<E, F>(
    store: &dyn DocumentStore<E>,
    plan: &QueryPlan,
    to_document: F,
) -> Result<DocumentPage, DomainError>
where
    E: Document + 'static,
    F: Fn(&E) -> Value,
{
    let total = store.count(&plan.filter).await?;
    let pagination = plan.paginate(total);
    let entities = store.find(&plan.read_plan(&pagination)).await?;

    let data = entities
        .iter()
        .map(|entity| plan.projection.apply(to_document(entity)))
        .collect();

    Ok(DocumentPage {
        data,
        count: total,
        pagination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::QueryParams;
    use crate::domain::storage::DocumentKey;
    use crate::infrastructure::storage::InMemoryStore;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct TestId(String);

    impl DocumentKey for TestId {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestDoc {
        id: TestId,
        name: String,
        rank: u32,
        created_at: String,
    }

    impl Document for TestDoc {
        type Key = TestId;

        fn key(&self) -> &Self::Key {
            &self.id
        }

        const COLLECTION: &'static str = "test_docs";
    }

    fn doc(id: &str, name: &str, rank: u32) -> TestDoc {
        TestDoc {
            id: TestId(id.to_string()),
            name: name.to_string(),
            rank,
            created_at: format!("2026-01-01T00:00:0{}Z", rank),
        }
    }

    #[tokio::test]
    async fn test_run_query_pages_and_projects() {
        let store = InMemoryStore::with_documents(vec![
            doc("d-1", "alpha", 1),
            doc("d-2", "beta", 2),
            doc("d-3", "gamma", 3),
        ]);

        let params = QueryParams::from_pairs([
            ("page", "1"),
            ("limit", "2"),
            ("sort", "rank"),
            ("select", "name"),
        ]);
        let plan = QueryPlan::from_params(&params);

        let page = run_query(&store, &plan, |entity| {
            serde_json::to_value(entity).unwrap_or(Value::Null)
        })
        .await
        .unwrap();

        assert_eq!(page.count, 3);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.next_page, Some(2));
        assert_eq!(page.pagination.prev_page, None);

        // Projection keeps the id plus selected fields only
        let first = page.data[0].as_object().unwrap();
        assert!(first.contains_key("id"));
        assert!(first.contains_key("name"));
        assert!(!first.contains_key("rank"));
    }

    #[tokio::test]
    async fn test_run_query_scoped_filter() {
        let store = InMemoryStore::with_documents(vec![
            doc("d-1", "alpha", 1),
            doc("d-2", "alpha", 2),
            doc("d-3", "beta", 3),
        ]);

        let params = QueryParams::from_pairs(Vec::<(String, String)>::new());
        let plan = QueryPlan::from_params(&params).scope_eq("name", "alpha");

        let page = run_query(&store, &plan, |entity| {
            serde_json::to_value(entity).unwrap_or(Value::Null)
        })
        .await
        .unwrap();

        assert_eq!(page.count, 2);
    }
}
