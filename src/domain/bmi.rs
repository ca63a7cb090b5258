//! BMI engine. Pure arithmetic and category lookup.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNDERWEIGHT_BELOW: f64 = 18.5;
pub const NORMAL_BELOW: f64 = 25.0;
pub const OVERWEIGHT_BELOW: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Human-readable range, e.g. "18.5 ≤ BMI < 25".
    pub fn range(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "BMI < 18.5",
            BmiCategory::Normal => "18.5 ≤ BMI < 25",
            BmiCategory::Overweight => "25 ≤ BMI < 30",
            BmiCategory::Obese => "BMI ≥ 30",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `weight_kg / height_m²`.
///
/// Zero height, or a height whose square underflows to zero, is reported as
/// [`DivisionByZero`](DomainError::DivisionByZero) whatever the weight. Any other
/// non-positive or non-finite input, or a quotient that overflows, is
/// [`InvalidMagnitude`](DomainError::InvalidMagnitude).
pub fn compute(weight_kg: f64, height_m: f64) -> Result<f64, DomainError> {
    if height_m == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    check_magnitude("weight", weight_kg)?;
    check_magnitude("height", height_m)?;
    let denom = height_m * height_m;
    if denom == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    check_magnitude("bmi", weight_kg / denom)
}

/// Half-open buckets; a boundary value belongs to the higher category.
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

pub(crate) fn check_magnitude(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidMagnitude { quantity, value })
    }
}
