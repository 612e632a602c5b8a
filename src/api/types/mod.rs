//! Shared API types: errors, envelopes and the JSON extractor

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{DataResponse, ListResponse, MessageResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
