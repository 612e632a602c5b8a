//! Document store abstraction

pub mod entity;
pub mod repository;

pub use entity::{Document, DocumentKey};
pub use repository::DocumentStore;
