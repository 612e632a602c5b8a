//! Document store entity traits

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

/// Trait for types usable as document keys
pub trait DocumentKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// The key as a string, for backends keyed by text
    fn as_str(&self) -> &str;
}

/// Trait for entities persisted as documents
pub trait Document: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this document
    type Key: DocumentKey;

    /// Returns the document's key
    fn key(&self) -> &Self::Key;

    /// Collection name the documents live in
    const COLLECTION: &'static str;
}
