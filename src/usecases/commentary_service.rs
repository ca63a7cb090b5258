//! Commentary orchestrator. Two stateless persona calls per BMI.
//!
//! The critic and stylist requests run concurrently and share nothing mutable;
//! each result stands on its own.

use crate::domain::{ChatTurn, CommentaryResult, DomainError, Persona};
use crate::ports::GenerationPort;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CommentaryService {
    generator: Arc<dyn GenerationPort>,
    model: String,
}

impl CommentaryService {
    /// # Arguments
    /// * `generator` - Generation collaborator
    /// * `model` - Model identifier for both personas (e.g. "openai/gpt-4o")
    pub fn new(generator: Arc<dyn GenerationPort>, model: String) -> Self {
        Self { generator, model }
    }

    /// Cruel comedian's take on the BMI.
    pub async fn critique(&self, bmi: f64) -> Result<String, DomainError> {
        self.ask(Persona::Critic, bmi).await
    }

    /// Fashion stylist's advice for the BMI.
    pub async fn style_advice(&self, bmi: f64) -> Result<String, DomainError> {
        self.ask(Persona::Stylist, bmi).await
    }

    /// Both personas at once. Never fails as a whole.
    pub async fn commentary(&self, bmi: f64) -> CommentaryResult {
        let (critique, style_advice) = tokio::join!(self.critique(bmi), self.style_advice(bmi));
        CommentaryResult {
            critique,
            style_advice,
        }
    }

    async fn ask(&self, persona: Persona, bmi: f64) -> Result<String, DomainError> {
        let messages = [
            ChatTurn::system(persona.system_prompt()),
            ChatTurn::user(persona.user_message(bmi)),
        ];
        info!(persona = persona.name(), model = %self.model, bmi, "requesting commentary");

        let text = self
            .generator
            .complete(&self.model, &messages)
            .await
            .inspect_err(|e| warn!(persona = persona.name(), error = %e, "commentary failed"))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::MalformedGenerationOutput(format!(
                "{} returned an empty reply",
                persona.name()
            )));
        }
        Ok(text.to_string())
    }
}
