//! Request extractors for authentication and authorization

pub mod admin_auth;
pub mod user_auth;

pub use admin_auth::RequireAdmin;
pub use user_auth::{RequireUser, extract_jwt_token};
