//! Invitation email delivery

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for sending invitation emails
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send an invitation notification to the given address
    async fn send(&self, address: &str) -> Result<(), DomainError>;
}

/// Email sender that only logs the delivery.
///
/// Stands in for a real transport in development; delivery is best-effort
/// by contract, so callers treat failures as non-fatal.
#[derive(Debug, Clone, Default)]
pub struct TracingEmailSender;

impl TracingEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for TracingEmailSender {
    async fn send(&self, address: &str) -> Result<(), DomainError> {
        tracing::info!(address = %address, "Sending invitation email");
        Ok(())
    }
}
