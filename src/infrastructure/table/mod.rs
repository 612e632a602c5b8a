//! Table infrastructure

pub mod service;

pub use service::TableService;
