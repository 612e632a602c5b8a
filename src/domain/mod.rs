//! Domain layer: entities, validation, query planning and storage traits

pub mod error;
pub mod query;
pub mod reservation;
pub mod storage;
pub mod table;
pub mod team;
pub mod user;

pub use error::DomainError;
