//! Team infrastructure

pub mod service;

pub use service::TeamService;
