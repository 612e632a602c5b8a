//! In-memory document store implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{Document, DocumentKey, DocumentStore};

/// Thread-safe in-memory document store
///
/// Useful for testing and development. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStore<E>
where
    E: Document,
{
    documents: RwLock<HashMap<String, E>>,
    unique_fields: Vec<String>,
}

impl<E> Default for InMemoryStore<E>
where
    E: Document,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStore<E>
where
    E: Document,
{
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            unique_fields: Vec::new(),
        }
    }

    /// Enforces uniqueness over one field of the serialized document.
    ///
    /// The in-memory counterpart of the PostgreSQL unique field index, so
    /// writes that would violate it surface as the same conflict with either
    /// backend.
    pub fn with_unique_field(mut self, field: impl Into<String>) -> Self {
        self.unique_fields.push(field.into());
        self
    }

    fn check_unique_fields(
        &self,
        documents: &HashMap<String, E>,
        entity: &E,
        key: &str,
    ) -> Result<(), DomainError> {
        if self.unique_fields.is_empty() {
            return Ok(());
        }

        let candidate = serde_json::to_value(entity)
            .map_err(|e| DomainError::storage(format!("Failed to serialize document: {}", e)))?;

        for field in &self.unique_fields {
            let Some(value) = candidate.get(field).filter(|v| !v.is_null()) else {
                continue;
            };

            for (existing_key, existing) in documents.iter() {
                if existing_key == key {
                    continue;
                }

                let existing = serde_json::to_value(existing).map_err(|e| {
                    DomainError::storage(format!("Failed to serialize document: {}", e))
                })?;

                if existing.get(field) == Some(value) {
                    return Err(DomainError::conflict(format!(
                        "Document violates a unique constraint on '{}'",
                        field
                    )));
                }
            }
        }

        Ok(())
    }

    /// Creates a store pre-populated with documents
    pub fn with_documents(documents: Vec<E>) -> Self {
        let store = Self::new();
        {
            let mut map = store.documents.write().unwrap();

            for document in documents {
                map.insert(document.key().as_str().to_string(), document);
            }
        }
        store
    }
}

#[async_trait]
impl<E> DocumentStore<E> for InMemoryStore<E>
where
    E: Document + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(documents.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(documents.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if documents.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Document with key '{}' already exists",
                key
            )));
        }

        self.check_unique_fields(&documents, &entity, &key)?;

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if !documents.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Document with key '{}' not found",
                key
            )));
        }

        self.check_unique_fields(&documents, &entity, &key)?;

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(documents.remove(key.as_str()).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        documents.clear();
        Ok(())
    }
}
