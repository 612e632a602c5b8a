//! Table and chair domain model

pub mod entity;
pub mod validation;

pub use entity::{Chair, ChairId, Table, TableId};
pub use validation::{MAX_CHAIRS_PER_TABLE, TableValidationError, validate_chairs_count};
