//! Domain entities. Pure data structures for the core business.
//!
//! Everything here lives for a single interaction and is dropped after rendering.

use super::bmi::BmiCategory;
use super::errors::DomainError;
use super::units::{HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A magnitude paired with a unit tag, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub magnitude: f64,
    pub unit: U,
}

pub type WeightMeasurement = Measurement<WeightUnit>;
pub type HeightMeasurement = Measurement<HeightUnit>;

impl<U> Measurement<U> {
    pub fn new(magnitude: f64, unit: U) -> Self {
        Self { magnitude, unit }
    }
}

impl<U: fmt::Display> fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

/// Weight in kilograms and height in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMeasurement {
    pub weight_kg: f64,
    pub height_m: f64,
}

/// Which resolver produced a normalization. Carried on every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverStrategy {
    /// Fixed conversion table, no collaborator involved.
    Deterministic,
    /// Conversion requested from the generation collaborator.
    Delegated,
}

impl fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverStrategy::Deterministic => f.write_str("deterministic"),
            ResolverStrategy::Delegated => f.write_str("delegated"),
        }
    }
}

/// A computed BMI with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReading {
    pub normalized: NormalizedMeasurement,
    pub bmi: f64,
    pub category: BmiCategory,
    pub strategy: ResolverStrategy,
}

/// Critique and style advice. Each side fails on its own.
#[derive(Debug)]
pub struct CommentaryResult {
    pub critique: Result<String, DomainError>,
    pub style_advice: Result<String, DomainError>,
}

/// Everything the front end renders for one interaction.
#[derive(Debug)]
pub struct BmiReport {
    pub reading: BmiReading,
    pub commentary: CommentaryResult,
}

/// Fixed system-level instruction for a commentary call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Critic,
    Stylist,
}

impl Persona {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Persona::Critic => {
                "You are a sassy comedian, be as cruel as you can on commenting if the bmi is good or not. Spare no feelings."
            }
            Persona::Stylist => {
                "You are a sassy fashion stylist from a world renowned fashion company, from the Devil Wears Prada, you are given a bmi and you need to give the user a style advice. Be as cruel as you can on commenting and spare no feelings."
            }
        }
    }

    pub fn user_message(self, bmi: f64) -> String {
        format!("The BMI is {}. Comment on the BMI.", bmi)
    }

    pub fn name(self) -> &'static str {
        match self {
            Persona::Critic => "critic",
            Persona::Stylist => "stylist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only transcript for one user's interactive session.
///
/// Owned by the caller and passed explicitly to the delegated resolver, so two
/// sessions never see each other's turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    turns: Vec<ChatTurn>,
}

impl ConversationSession {
    /// Start a transcript seeded with a system instruction.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::system(system_prompt)],
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Transcript plus a pending user turn, without committing it.
    pub fn with_pending(&self, user: &str) -> Vec<ChatTurn> {
        let mut turns = self.turns.clone();
        turns.push(ChatTurn::user(user));
        turns
    }

    /// Record a completed exchange.
    pub fn commit(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(ChatTurn::user(user));
        self.turns.push(ChatTurn::assistant(assistant));
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchanges(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role == ChatRole::Assistant)
            .count()
    }
}
