//! Reservation infrastructure

pub mod service;

pub use service::{CreateReservationRequest, ReservationService, UpdateReservationRequest};
