//! User infrastructure: service and password hashing

pub mod password;
pub mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{InviteOutcome, InviteUserRequest, UpdateUserRequest, UserService};
