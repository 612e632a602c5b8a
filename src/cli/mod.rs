//! CLI module for the booking backend
//!
//! Provides the `serve` subcommand that runs the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// Booking backend - multi-tenant reservation API
#[derive(Parser)]
#[command(name = "booking-backend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
