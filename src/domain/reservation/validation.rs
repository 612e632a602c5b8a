//! Reservation validation

use chrono::{DateTime, Utc};
use thiserror::Error;

const MAX_ID_LENGTH: usize = 64;

/// Validation errors for reservations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReservationValidationError {
    #[error("Reservation ID must be 1-{MAX_ID_LENGTH} characters of alphanumerics and hyphens")]
    InvalidId,

    #[error("Reservation must start before it ends")]
    InvalidTimeRange,
}

pub fn validate_reservation_id(id: &str) -> Result<(), ReservationValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !id.starts_with('-')
        && !id.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(ReservationValidationError::InvalidId)
    }
}

pub fn validate_time_range(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<(), ReservationValidationError> {
    if starts_at < ends_at {
        Ok(())
    } else {
        Err(ReservationValidationError::InvalidTimeRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reservation_id() {
        assert!(validate_reservation_id("res-1").is_ok());
        assert!(validate_reservation_id("").is_err());
    }

    #[test]
    fn test_time_range() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();

        assert!(validate_time_range(start, end).is_ok());
        assert!(validate_time_range(end, start).is_err());
        assert!(validate_time_range(start, start).is_err());
    }
}
