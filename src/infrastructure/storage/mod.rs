//! Storage backends

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::{PostgresConfig, PostgresStore, connect_pool};
