use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<crate::domain::user::UserValidationError> for DomainError {
    fn from(error: crate::domain::user::UserValidationError) -> Self {
        match error {
            crate::domain::user::UserValidationError::InvalidId => {
                Self::invalid_id(error.to_string())
            }
            _ => Self::validation(error.to_string()),
        }
    }
}

impl From<crate::domain::team::TeamValidationError> for DomainError {
    fn from(error: crate::domain::team::TeamValidationError) -> Self {
        match error {
            crate::domain::team::TeamValidationError::InvalidId => {
                Self::invalid_id(error.to_string())
            }
            _ => Self::validation(error.to_string()),
        }
    }
}

impl From<crate::domain::table::TableValidationError> for DomainError {
    fn from(error: crate::domain::table::TableValidationError) -> Self {
        match error {
            crate::domain::table::TableValidationError::InvalidId => {
                Self::invalid_id(error.to_string())
            }
            _ => Self::validation(error.to_string()),
        }
    }
}

impl From<crate::domain::reservation::ReservationValidationError> for DomainError {
    fn from(error: crate::domain::reservation::ReservationValidationError) -> Self {
        match error {
            crate::domain::reservation::ReservationValidationError::InvalidId => {
                Self::invalid_id(error.to_string())
            }
            _ => Self::validation(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User 'abc' not found");
        assert_eq!(error.to_string(), "Not found: User 'abc' not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("User has already accepted the invitation");
        assert_eq!(
            error.to_string(),
            "Conflict: User has already accepted the invitation"
        );
    }

    #[test]
    fn test_invalid_token_error() {
        let error = DomainError::invalid_token("signature mismatch");
        assert_eq!(error.to_string(), "Invalid token: signature mismatch");
    }
}
