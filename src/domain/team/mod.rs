//! Team domain model

pub mod entity;
pub mod validation;

pub use entity::{Team, TeamId};
pub use validation::{TeamValidationError, validate_team_id, validate_team_name};
