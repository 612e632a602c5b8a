//! Document store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::query::{QueryFilter, ReadPlan, count_matching, execute_plan};

use super::entity::{Document, DocumentKey};

/// Generic document store for one collection.
///
/// Read plans are evaluated over serialized documents with one shared
/// evaluator so every backend agrees on filter/sort semantics.
#[async_trait]
pub trait DocumentStore<E>: Send + Sync + Debug
where
    E: Document + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all documents in the collection
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new document, conflict if the key already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing document, not-found if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes a document by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Removes every document in the collection
    async fn clear(&self) -> Result<(), DomainError>;

    /// Executes a read plan: filter, sort, offset/limit window
    async fn find(&self, plan: &ReadPlan) -> Result<Vec<E>, DomainError> {
        execute_plan(self.list().await?, plan)
    }

    /// Counts the documents matching a filter
    async fn count(&self, filter: &QueryFilter) -> Result<u64, DomainError> {
        count_matching(&self.list().await?, filter)
    }

    /// Checks whether a document exists
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// First document matching a filter, in plan order
    async fn find_one(&self, filter: &QueryFilter) -> Result<Option<E>, DomainError> {
        let plan = ReadPlan::unbounded(filter.clone(), crate::domain::query::SortSpec::parse(None));
        Ok(self.find(&plan).await?.into_iter().next())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock document store for testing
    #[derive(Debug)]
    pub struct MockStore<E>
    where
        E: Document,
    {
        documents: Mutex<HashMap<String, E>>,
        error: Mutex<Option<String>>,
    }

    impl<E> Default for MockStore<E>
    where
        E: Document,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStore<E>
    where
        E: Document,
    {
        pub fn new() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_document(self, entity: E) -> Self {
            self.documents
                .lock()
                .unwrap()
                .insert(entity.key().as_str().to_string(), entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> DocumentStore<E> for MockStore<E>
    where
        E: Document + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.documents.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.documents.lock().unwrap().values().cloned().collect())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut documents = self.documents.lock().unwrap();

            if documents.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Document with key '{}' already exists",
                    key
                )));
            }

            documents.insert(key, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut documents = self.documents.lock().unwrap();

            if !documents.contains_key(&key) {
                return Err(DomainError::not_found(format!(
                    "Document with key '{}' not found",
                    key
                )));
            }

            documents.insert(key, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.documents.lock().unwrap().remove(key.as_str()).is_some())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            self.check_error()?;
            self.documents.lock().unwrap().clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::query::{QueryFilter, ReadPlan, SortSpec};
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        struct TestKey(String);

        impl DocumentKey for TestKey {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct TestDoc {
            id: TestKey,
            name: String,
            created_at: String,
        }

        impl Document for TestDoc {
            type Key = TestKey;

            fn key(&self) -> &Self::Key {
                &self.id
            }

            const COLLECTION: &'static str = "test_docs";
        }

        fn test_doc(id: &str, name: &str) -> TestDoc {
            TestDoc {
                id: TestKey(id.to_string()),
                name: name.to_string(),
                created_at: format!("2026-01-0{}T00:00:00Z", id.len()),
            }
        }

        #[tokio::test]
        async fn test_create_and_get() {
            let store: MockStore<TestDoc> = MockStore::new();
            let doc = test_doc("1", "Test");

            store.create(doc.clone()).await.unwrap();

            let found = store.get(&TestKey("1".to_string())).await.unwrap();
            assert_eq!(found.unwrap().name, "Test");
        }

        #[tokio::test]
        async fn test_create_conflict() {
            let doc = test_doc("1", "Test");
            let store: MockStore<TestDoc> = MockStore::new().with_document(doc.clone());

            let result = store.create(doc).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_update_not_found() {
            let store: MockStore<TestDoc> = MockStore::new();

            let result = store.update(test_doc("1", "Test")).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_delete() {
            let store: MockStore<TestDoc> = MockStore::new().with_document(test_doc("1", "Test"));

            assert!(store.delete(&TestKey("1".to_string())).await.unwrap());
            assert!(!store.exists(&TestKey("1".to_string())).await.unwrap());
        }

        #[tokio::test]
        async fn test_find_and_count_via_plan() {
            let store: MockStore<TestDoc> = MockStore::new()
                .with_document(test_doc("a", "One"))
                .with_document(test_doc("bb", "Two"))
                .with_document(test_doc("ccc", "One"));

            let filter = QueryFilter::new().with_eq("name", "One");
            assert_eq!(store.count(&filter).await.unwrap(), 2);

            let plan = ReadPlan::unbounded(filter, SortSpec::parse(None));
            let found = store.find(&plan).await.unwrap();
            assert_eq!(found.len(), 2);
            assert_eq!(found[0].id.as_str(), "a");
        }

        #[tokio::test]
        async fn test_find_one() {
            let store: MockStore<TestDoc> = MockStore::new().with_document(test_doc("a", "One"));

            let filter = QueryFilter::new().with_eq("name", "One");
            assert!(store.find_one(&filter).await.unwrap().is_some());

            let filter = QueryFilter::new().with_eq("name", "Missing");
            assert!(store.find_one(&filter).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_with_error() {
            let store: MockStore<TestDoc> = MockStore::new().with_error("boom");

            assert!(store.list().await.is_err());
        }
    }
}
