//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the unit table and the BMI rules live here. Dependencies flow inward.

pub mod bmi;
pub mod entities;
pub mod errors;
pub mod function_call;
pub mod units;

pub use bmi::{BmiCategory, classify, compute};
pub use entities::{
    BmiReading, BmiReport, ChatRole, ChatTurn, CommentaryResult, ConversationSession,
    HeightMeasurement, Measurement, NormalizedMeasurement, Persona, ResolverStrategy,
    WeightMeasurement,
};
pub use errors::DomainError;
pub use function_call::FunctionCall;
pub use units::{HeightUnit, WeightUnit};
