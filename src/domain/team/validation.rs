//! Team field validation

use thiserror::Error;

const MAX_ID_LENGTH: usize = 64;
const MAX_NAME_LENGTH: usize = 100;

/// Validation errors for team fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamValidationError {
    #[error("Team ID must be 1-{MAX_ID_LENGTH} characters of alphanumerics and hyphens")]
    InvalidId,

    #[error("Team name must be 1-{MAX_NAME_LENGTH} characters")]
    InvalidName,
}

pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !id.starts_with('-')
        && !id.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(TeamValidationError::InvalidId)
    }
}

pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
        Err(TeamValidationError::InvalidName)
    } else {
        Ok(())
    }
}
