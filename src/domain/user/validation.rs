//! User field validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

const MAX_ID_LENGTH: usize = 64;
const MAX_NAME_LENGTH: usize = 100;

/// Validation errors for user fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("User ID must be 1-{MAX_ID_LENGTH} characters of alphanumerics and hyphens")]
    InvalidId,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{0} must be 1-{MAX_NAME_LENGTH} characters")]
    InvalidName(&'static str),
}

pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !id.starts_with('-')
        && !id.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(UserValidationError::InvalidId)
    }
}

pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_name(label: &'static str, name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
        Err(UserValidationError::InvalidName(label))
    } else {
        Ok(())
    }
}
