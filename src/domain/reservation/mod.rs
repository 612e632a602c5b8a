//! Reservation domain model

pub mod entity;
pub mod validation;

pub use entity::{Reservation, ReservationId};
pub use validation::{ReservationValidationError, validate_time_range};
