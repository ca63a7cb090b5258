//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ChatTurn, DomainError};

/// Text-generation collaborator. Untrusted, non-deterministic black box.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    /// Submit role-tagged messages to `model` and return the single completion text.
    ///
    /// Network, auth, rate-limit and status failures map to `DomainError::Generation`.
    /// The returned text is not validated; callers parse it.
    async fn complete(&self, model: &str, messages: &[ChatTurn]) -> Result<String, DomainError>;
}
