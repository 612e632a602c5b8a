//! Table and chair validation

use thiserror::Error;

const MAX_ID_LENGTH: usize = 64;

/// Maximum number of chairs a single table can hold
pub const MAX_CHAIRS_PER_TABLE: u32 = 30;

/// Validation errors for tables and chairs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableValidationError {
    #[error("Table ID must be 1-{MAX_ID_LENGTH} characters of alphanumerics and hyphens")]
    InvalidId,

    #[error("A table must have between 1 and {MAX_CHAIRS_PER_TABLE} chairs, got {0}")]
    InvalidChairCount(u32),
}

pub fn validate_table_id(id: &str) -> Result<(), TableValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !id.starts_with('-')
        && !id.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(TableValidationError::InvalidId)
    }
}

pub fn validate_chairs_count(count: u32) -> Result<(), TableValidationError> {
    if count == 0 || count > MAX_CHAIRS_PER_TABLE {
        Err(TableValidationError::InvalidChairCount(count))
    } else {
        Ok(())
    }
}
