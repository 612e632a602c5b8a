//! Infrastructure layer: storage, auth, services and logging

pub mod auth;
pub mod email;
pub mod listing;
pub mod logging;
pub mod reservation;
pub mod storage;
pub mod table;
pub mod team;
pub mod user;
