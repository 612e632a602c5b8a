//! User domain model

pub mod entity;
pub mod validation;

pub use entity::{User, UserId, UserUpdate};
pub use validation::{UserValidationError, validate_email, validate_name, validate_user_id};
