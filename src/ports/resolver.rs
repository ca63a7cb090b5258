//! Unit resolver port. Normalizes weight and height to kilograms and meters.

use crate::domain::{
    ConversationSession, DomainError, HeightMeasurement, NormalizedMeasurement, ResolverStrategy,
    WeightMeasurement,
};

/// Converts measurements to canonical units.
///
/// Implementations are swappable; each reports its [`ResolverStrategy`] so a
/// reading always says how it was produced.
#[async_trait::async_trait]
pub trait UnitResolver: Send + Sync {
    fn strategy(&self) -> ResolverStrategy;

    /// Normalize a weight/height pair.
    ///
    /// `session` is the caller's transcript. Resolvers that do not talk to the
    /// collaborator leave it untouched.
    ///
    /// # Errors
    /// `InvalidMagnitude` for non-positive or non-finite magnitudes. Delegating
    /// resolvers also return `Generation` and `MalformedGenerationOutput`.
    async fn resolve(
        &self,
        session: &mut ConversationSession,
        weight: &WeightMeasurement,
        height: &HeightMeasurement,
    ) -> Result<NormalizedMeasurement, DomainError>;

    /// Normalize a free-form description ("I'm 11 stone and 5ft 7").
    ///
    /// Only resolvers that can read prose support this; the default refuses.
    async fn resolve_text(
        &self,
        _session: &mut ConversationSession,
        _text: &str,
    ) -> Result<NormalizedMeasurement, DomainError> {
        Err(DomainError::Config(format!(
            "the {} resolver cannot read free-form text; set BMI_STYLIST_RESOLVER_MODE=delegated",
            self.strategy()
        )))
    }
}
