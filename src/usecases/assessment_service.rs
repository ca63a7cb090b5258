//! Assessment service. Sequences resolve -> compute -> classify -> commentary.
//!
//! Resolution and arithmetic failures end the assessment. Commentary failures do
//! not: once a BMI exists it is always returned, with each commentary block
//! carrying its own result.

use crate::domain::{
    BmiReading, BmiReport, CommentaryResult, ConversationSession, DomainError, HeightMeasurement,
    NormalizedMeasurement, WeightMeasurement, classify, compute,
};
use crate::ports::UnitResolver;
use crate::usecases::commentary_service::CommentaryService;
use crate::usecases::unit_resolver::new_conversion_session;
use std::sync::Arc;
use tracing::info;

pub struct AssessmentService {
    resolver: Arc<dyn UnitResolver>,
    commentary: Arc<CommentaryService>,
}

impl AssessmentService {
    pub fn new(resolver: Arc<dyn UnitResolver>, commentary: Arc<CommentaryService>) -> Self {
        Self {
            resolver,
            commentary,
        }
    }

    pub fn resolver(&self) -> &dyn UnitResolver {
        self.resolver.as_ref()
    }

    /// Transcript for one user's interactive session.
    pub fn new_session(&self) -> ConversationSession {
        new_conversion_session()
    }

    /// Normalize, compute and classify.
    pub async fn measure(
        &self,
        session: &mut ConversationSession,
        weight: &WeightMeasurement,
        height: &HeightMeasurement,
    ) -> Result<BmiReading, DomainError> {
        let normalized = self.resolver.resolve(session, weight, height).await?;
        self.reading(normalized)
    }

    /// Same as [`measure`](Self::measure) for a free-form description.
    pub async fn measure_text(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<BmiReading, DomainError> {
        let normalized = self.resolver.resolve_text(session, text).await?;
        self.reading(normalized)
    }

    pub async fn comment(&self, bmi: f64) -> CommentaryResult {
        self.commentary.commentary(bmi).await
    }

    /// Full interaction: reading first, then both commentary blocks.
    pub async fn assess(
        &self,
        session: &mut ConversationSession,
        weight: &WeightMeasurement,
        height: &HeightMeasurement,
    ) -> Result<BmiReport, DomainError> {
        let reading = self.measure(session, weight, height).await?;
        let commentary = self.comment(reading.bmi).await;
        Ok(BmiReport {
            reading,
            commentary,
        })
    }

    fn reading(&self, normalized: NormalizedMeasurement) -> Result<BmiReading, DomainError> {
        let bmi = compute(normalized.weight_kg, normalized.height_m)?;
        let category = classify(bmi);
        let strategy = self.resolver.strategy();
        info!(
            %strategy,
            weight_kg = normalized.weight_kg,
            height_m = normalized.height_m,
            bmi,
            category = category.label(),
            "BMI computed"
        );
        Ok(BmiReading {
            normalized,
            bmi,
            category,
            strategy,
        })
    }
}
