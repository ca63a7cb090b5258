//! Structured function call returned by the collaborator on the delegated
//! conversion path.
//!
//! Two shapes are accepted and nothing else:
//! - JSON: `{"function": "bmi_calculator", "weight_kg": 69.85, "height_m": 1.70}`
//! - Positional: `bmi_calculator 69.85 1.70` (exactly three tokens)
//!
//! Markdown code fences around the JSON form are stripped first.

use super::bmi::check_magnitude;
use super::entities::NormalizedMeasurement;
use super::errors::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case", deny_unknown_fields)]
pub enum FunctionCall {
    BmiCalculator { weight_kg: f64, height_m: f64 },
}

impl FunctionCall {
    pub fn name(&self) -> &'static str {
        match self {
            FunctionCall::BmiCalculator { .. } => "bmi_calculator",
        }
    }

    /// Parse and validate a reply. Any deviation is `MalformedGenerationOutput`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let text = strip_fences(raw);
        if text.is_empty() {
            return Err(malformed("empty reply", raw));
        }
        let call = if text.starts_with('{') {
            serde_json::from_str::<FunctionCall>(text)
                .map_err(|e| malformed(&format!("invalid JSON call ({})", e), raw))?
        } else {
            Self::parse_positional(text, raw)?
        };
        call.validate(raw)
    }

    fn parse_positional(text: &str, raw: &str) -> Result<Self, DomainError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [name, weight, height] = tokens.as_slice() else {
            return Err(malformed(
                &format!("expected 3 tokens, got {}", tokens.len()),
                raw,
            ));
        };
        match *name {
            "bmi_calculator" => Ok(FunctionCall::BmiCalculator {
                weight_kg: parse_number(weight, raw)?,
                height_m: parse_number(height, raw)?,
            }),
            other => Err(malformed(&format!("unknown function {:?}", other), raw)),
        }
    }

    fn validate(self, raw: &str) -> Result<Self, DomainError> {
        match self {
            FunctionCall::BmiCalculator {
                weight_kg,
                height_m,
            } => {
                check_magnitude("weight", weight_kg)
                    .and_then(|_| check_magnitude("height", height_m))
                    .map_err(|e| malformed(&e.to_string(), raw))?;
            }
        }
        Ok(self)
    }

    pub fn into_normalized(self) -> NormalizedMeasurement {
        match self {
            FunctionCall::BmiCalculator {
                weight_kg,
                height_m,
            } => NormalizedMeasurement {
                weight_kg,
                height_m,
            },
        }
    }
}

fn parse_number(token: &str, raw: &str) -> Result<f64, DomainError> {
    token
        .parse::<f64>()
        .map_err(|_| malformed(&format!("{:?} is not a number", token), raw))
}

fn malformed(reason: &str, raw: &str) -> DomainError {
    DomainError::MalformedGenerationOutput(format!(
        "{}; reply was {:?}",
        reason,
        raw.chars().take(120).collect::<String>()
    ))
}

/// Strip surrounding ```json ... ``` or ``` ... ``` fences.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_malformed(raw: &str) {
        match FunctionCall::parse(raw) {
            Err(DomainError::MalformedGenerationOutput(_)) => {}
            other => panic!("expected malformed output for {:?}, got {:?}", raw, other),
        }
    }

    #[test]
    fn test_parse_positional() {
        let call = FunctionCall::parse("bmi_calculator 69.85 1.7018").unwrap();
        assert_eq!(
            call,
            FunctionCall::BmiCalculator {
                weight_kg: 69.85,
                height_m: 1.7018
            }
        );
        assert_eq!(call.name(), "bmi_calculator");
    }

    #[test]
    fn test_parse_json_and_fenced_json() {
        let json = r#"{"function": "bmi_calculator", "weight_kg": 70, "height_m": 1.75}"#;
        let fenced = format!("```json\n{}\n```", json);
        for raw in [json.to_string(), fenced] {
            let normalized = FunctionCall::parse(&raw).unwrap().into_normalized();
            assert_eq!(normalized.weight_kg, 70.0);
            assert_eq!(normalized.height_m, 1.75);
        }
    }

    #[test]
    fn test_wrong_token_count() {
        expect_malformed("bmi_calculator 70");
        expect_malformed("bmi_calculator 70 1.75 extra");
        expect_malformed("Sure! bmi_calculator 70 1.75");
        expect_malformed("");
        expect_malformed("   ");
    }

    #[test]
    fn test_unknown_function_or_bad_numbers() {
        expect_malformed("bmi_calculatr 70 1.75");
        expect_malformed("bmi_calculator seventy 1.75");
        expect_malformed("bmi_calculator 70kg 1.75m");
    }

    #[test]
    fn test_json_deviations() {
        expect_malformed(r#"{"function": "bmi_calculator", "weight_kg": 70}"#);
        expect_malformed(r#"{"function": "other", "weight_kg": 70, "height_m": 1.75}"#);
        expect_malformed(
            r#"{"function": "bmi_calculator", "weight_kg": 70, "height_m": 1.75, "note": "hi"}"#,
        );
        expect_malformed(r#"{"function": "bmi_calculator", "weight_kg": "70", "height_m": 1.75}"#);
    }

    #[test]
    fn test_rejects_non_positive_or_non_finite_arguments() {
        expect_malformed("bmi_calculator 70 0");
        expect_malformed("bmi_calculator -70 1.75");
        expect_malformed("bmi_calculator NaN 1.75");
        expect_malformed("bmi_calculator 70 inf");
    }
}
