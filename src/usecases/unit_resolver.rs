//! Unit resolvers. Two explicit strategies behind [`UnitResolver`]:
//!
//! - [`DeterministicResolver`]: fixed conversion table, no I/O.
//! - [`DelegatingResolver`]: asks the generation collaborator for the conversion and
//!   parses its reply as a [`FunctionCall`]. Non-deterministic by nature.

use crate::domain::bmi::check_magnitude;
use crate::domain::{
    ConversationSession, DomainError, FunctionCall, HeightMeasurement, NormalizedMeasurement,
    ResolverStrategy, WeightMeasurement,
};
use crate::ports::{GenerationPort, UnitResolver};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// System instruction that seeds every conversion transcript.
pub const UNIT_CONVERSION_PROMPT: &str = r#"You are a unit converter for a BMI calculator.
When the user gives a weight and a height, convert the weight to kilograms and the height to meters, then call the bmi_calculator function.

Respond with exactly one line in this format:
bmi_calculator <weight_kg> <height_m>

For example, "My weight is 60kg and my height is 170cm" must be answered with:
bmi_calculator 60 1.70

Use plain decimal numbers, no units. Conversions: 1 kg = 2.20462 lbs, 1 stone = 6.35 kg, 1 m = 100 cm = 3.28084 ft = 39.3701 in.
ONLY return the format given, NO EXTRA WORDS."#;

/// Fresh transcript for one interactive session of the delegated resolver.
pub fn new_conversion_session() -> ConversationSession {
    ConversationSession::new(UNIT_CONVERSION_PROMPT)
}

fn normalize_locally(
    weight: &WeightMeasurement,
    height: &HeightMeasurement,
) -> Result<NormalizedMeasurement, DomainError> {
    let weight_kg = weight
        .unit
        .to_kilograms(check_magnitude("weight", weight.magnitude)?);
    let height_m = height
        .unit
        .to_meters(check_magnitude("height", height.magnitude)?);
    Ok(NormalizedMeasurement {
        weight_kg,
        height_m,
    })
}

/// Pure arithmetic on the conversion table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeterministicResolver;

impl DeterministicResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl UnitResolver for DeterministicResolver {
    fn strategy(&self) -> ResolverStrategy {
        ResolverStrategy::Deterministic
    }

    async fn resolve(
        &self,
        _session: &mut ConversationSession,
        weight: &WeightMeasurement,
        height: &HeightMeasurement,
    ) -> Result<NormalizedMeasurement, DomainError> {
        let normalized = normalize_locally(weight, height)?;
        debug!(
            weight = %weight,
            height = %height,
            weight_kg = normalized.weight_kg,
            height_m = normalized.height_m,
            "normalized with conversion table"
        );
        Ok(normalized)
    }
}

/// Delegates conversion to the collaborator, carrying the caller's transcript.
pub struct DelegatingResolver {
    generator: Arc<dyn GenerationPort>,
    model: String,
}

impl DelegatingResolver {
    /// # Arguments
    /// * `generator` - Generation collaborator (OpenAI-compatible or mock)
    /// * `model` - Model identifier used for conversion requests
    pub fn new(generator: Arc<dyn GenerationPort>, model: String) -> Self {
        Self { generator, model }
    }

    /// One request/response turn on `session`. The session only grows when the
    /// reply parses; a failed or malformed exchange leaves it as it was.
    async fn exchange(
        &self,
        session: &mut ConversationSession,
        user: String,
    ) -> Result<NormalizedMeasurement, DomainError> {
        let messages = session.with_pending(&user);
        info!(
            model = %self.model,
            messages = messages.len(),
            "requesting unit conversion from collaborator"
        );

        let reply = self.generator.complete(&self.model, &messages).await?;
        let call = FunctionCall::parse(&reply).inspect_err(|e| {
            warn!(error = %e, "conversion reply rejected");
        })?;

        session.commit(user, reply.trim());
        let normalized = call.into_normalized();
        info!(
            function = call.name(),
            weight_kg = normalized.weight_kg,
            height_m = normalized.height_m,
            exchanges = session.exchanges(),
            "collaborator conversion accepted"
        );
        Ok(normalized)
    }
}

#[async_trait::async_trait]
impl UnitResolver for DelegatingResolver {
    fn strategy(&self) -> ResolverStrategy {
        ResolverStrategy::Delegated
    }

    async fn resolve(
        &self,
        session: &mut ConversationSession,
        weight: &WeightMeasurement,
        height: &HeightMeasurement,
    ) -> Result<NormalizedMeasurement, DomainError> {
        check_magnitude("weight", weight.magnitude)?;
        check_magnitude("height", height.magnitude)?;
        let user = format!("My weight is {} and my height is {}", weight, height);
        self.exchange(session, user).await
    }

    async fn resolve_text(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<NormalizedMeasurement, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Input("description is empty".to_string()));
        }
        self.exchange(session, text.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockGenerationAdapter, MockRoute};
    use crate::domain::{ChatRole, HeightUnit, Measurement, WeightUnit};

    fn lbs_and_inches() -> (WeightMeasurement, HeightMeasurement) {
        (
            Measurement::new(154.0, WeightUnit::Pound),
            Measurement::new(67.0, HeightUnit::Inch),
        )
    }

    #[tokio::test]
    async fn test_deterministic_converts_imperial() {
        let (w, h) = lbs_and_inches();
        let mut session = new_conversion_session();
        let n = DeterministicResolver::new()
            .resolve(&mut session, &w, &h)
            .await
            .unwrap();
        assert!((n.weight_kg - 69.85).abs() < 0.01);
        assert!((n.height_m - 1.7018).abs() < 0.0001);
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_deterministic_rejects_bad_magnitude() {
        let mut session = new_conversion_session();
        let err = DeterministicResolver::new()
            .resolve(
                &mut session,
                &Measurement::new(0.0, WeightUnit::Kilogram),
                &Measurement::new(1.75, HeightUnit::Meter),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidMagnitude {
                quantity: "weight",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_deterministic_refuses_free_text() {
        let mut session = new_conversion_session();
        let err = DeterministicResolver::new()
            .resolve_text(&mut session, "I weigh 70kg")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[tokio::test]
    async fn test_delegated_accepts_reply_and_grows_session() {
        let mock = Arc::new(
            MockGenerationAdapter::with_delay(0)
                .with_reply(MockRoute::UnitConversion, "bmi_calculator 69.85 1.7018"),
        );
        let resolver = DelegatingResolver::new(mock.clone(), "test-model".to_string());
        let (w, h) = lbs_and_inches();
        let mut session = new_conversion_session();

        let n = resolver.resolve(&mut session, &w, &h).await.unwrap();
        assert_eq!(n.weight_kg, 69.85);
        assert_eq!(n.height_m, 1.7018);

        let turns = session.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].role, ChatRole::User);
        assert_eq!(turns[1].content, "My weight is 154lbs and my height is 67inches");
        assert_eq!(turns[2].role, ChatRole::Assistant);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "test-model");
        assert_eq!(requests[0].1.len(), 2);
    }

    #[tokio::test]
    async fn test_delegated_malformed_reply_leaves_session_untouched() {
        let mock = Arc::new(
            MockGenerationAdapter::with_delay(0)
                .with_reply(MockRoute::UnitConversion, "Sure! bmi_calculator 69.85 1.70"),
        );
        let resolver = DelegatingResolver::new(mock, "m".to_string());
        let (w, h) = lbs_and_inches();
        let mut session = new_conversion_session();

        let err = resolver.resolve(&mut session, &w, &h).await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedGenerationOutput(_)));
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_delegated_generation_failure_surfaces() {
        let mock = Arc::new(
            MockGenerationAdapter::with_delay(0)
                .with_failure(MockRoute::UnitConversion, "429 rate limited"),
        );
        let resolver = DelegatingResolver::new(mock, "m".to_string());
        let (w, h) = lbs_and_inches();
        let mut session = new_conversion_session();

        let err = resolver.resolve(&mut session, &w, &h).await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(ref m) if m.contains("429")));
        assert_eq!(session.exchanges(), 0);
    }

    #[tokio::test]
    async fn test_delegated_validates_before_request() {
        let mock = Arc::new(MockGenerationAdapter::with_delay(0));
        let resolver = DelegatingResolver::new(mock.clone(), "m".to_string());
        let mut session = new_conversion_session();

        let err = resolver
            .resolve(
                &mut session,
                &Measurement::new(70.0, WeightUnit::Kilogram),
                &Measurement::new(f64::NAN, HeightUnit::Meter),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidMagnitude { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let mock = Arc::new(
            MockGenerationAdapter::with_delay(0)
                .with_reply(MockRoute::UnitConversion, "bmi_calculator 70 1.75"),
        );
        let resolver = DelegatingResolver::new(mock.clone(), "m".to_string());
        let mut alice = new_conversion_session();
        let mut bob = new_conversion_session();

        resolver
            .resolve_text(&mut alice, "70 kilos, 175 cm")
            .await
            .unwrap();
        resolver
            .resolve_text(&mut alice, "same again please")
            .await
            .unwrap();
        resolver
            .resolve_text(&mut bob, "I'm 70kg and 1.75m")
            .await
            .unwrap();

        assert_eq!(alice.exchanges(), 2);
        assert_eq!(bob.exchanges(), 1);
        assert!(
            !bob.turns()
                .iter()
                .any(|t| t.content.contains("kilos"))
        );

        // Third request carries only bob's transcript plus the pending turn.
        let requests = mock.requests();
        assert_eq!(requests[1].1.len(), 4);
        assert_eq!(requests[2].1.len(), 2);
    }

    #[tokio::test]
    async fn test_delegated_rejects_empty_text() {
        let mock = Arc::new(MockGenerationAdapter::with_delay(0));
        let resolver = DelegatingResolver::new(mock, "m".to_string());
        let mut session = new_conversion_session();
        let err = resolver
            .resolve_text(&mut session, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }
}
