//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Magnitude is zero, negative, NaN or infinite.
    #[error("Invalid {quantity} magnitude: {value}")]
    InvalidMagnitude { quantity: &'static str, value: f64 },

    #[error("Unsupported unit: {0:?}")]
    UnsupportedUnit(String),

    #[error("Division by zero: height is 0")]
    DivisionByZero,

    /// Collaborator replied, but not in the requested shape.
    #[error("Malformed generation output: {0}")]
    MalformedGenerationOutput(String),

    /// Network, auth, rate-limit or HTTP status failure from the collaborator.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Missing credential: set {0} (env or .env)")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}
