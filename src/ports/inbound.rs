//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the assessment use case.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop until the user exits.
    async fn run(&self) -> Result<(), DomainError>;
}
