//! Application configuration. API credential, endpoint, models, resolver mode.

use crate::domain::{DomainError, HeightUnit, WeightUnit};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Env var holding the API key.
pub const API_KEY_VAR: &str = "BMI_STYLIST_API_KEY";
/// Fallback env var name, kept for existing `.env` files.
pub const LEGACY_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_RESOLVER_MODEL: &str = "moonshotai/kimi-k2";
pub const DEFAULT_COMMENTARY_MODEL: &str = "openai/gpt-4o";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// How measurements are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverMode {
    /// Conversion table arithmetic.
    #[default]
    Deterministic,
    /// Ask the collaborator to convert (non-deterministic).
    Delegated,
}

impl FromStr for ResolverMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deterministic" | "local" => Ok(ResolverMode::Deterministic),
            "delegated" | "llm" => Ok(ResolverMode::Delegated),
            other => Err(DomainError::Config(format!(
                "unknown resolver mode {:?} (expected deterministic or delegated)",
                other
            ))),
        }
    }
}

impl fmt::Display for ResolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverMode::Deterministic => f.write_str("deterministic"),
            ResolverMode::Delegated => f.write_str("delegated"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// API key for the generation collaborator. Read from BMI_STYLIST_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base. Read from BMI_STYLIST_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model for delegated unit conversion. Read from BMI_STYLIST_RESOLVER_MODEL.
    #[serde(default)]
    pub resolver_model: Option<String>,

    /// Model for critic and stylist commentary. Read from BMI_STYLIST_COMMENTARY_MODEL.
    #[serde(default)]
    pub commentary_model: Option<String>,

    /// "deterministic" or "delegated". Read from BMI_STYLIST_RESOLVER_MODE.
    #[serde(default)]
    pub resolver_mode: Option<String>,

    /// Per-request HTTP timeout. Read from BMI_STYLIST_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Use the scripted mock collaborator instead of the network. Read from BMI_STYLIST_USE_MOCK.
    #[serde(default)]
    pub use_mock: Option<bool>,

    /// Preselected weight unit tag, e.g. "lbs". Read from BMI_STYLIST_WEIGHT_UNIT.
    #[serde(default)]
    pub weight_unit: Option<String>,

    /// Preselected height unit tag, e.g. "feet". Read from BMI_STYLIST_HEIGHT_UNIT.
    #[serde(default)]
    pub height_unit: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("BMI_STYLIST_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("BMI_STYLIST"));
        c.build()?.try_deserialize()
    }

    /// API key from config, then BMI_STYLIST_API_KEY, then OPENROUTER_API_KEY.
    ///
    /// # Errors
    /// `MissingCredential` when none is set or the value is blank.
    pub fn api_key(&self) -> Result<String, DomainError> {
        self.api_key_with(|k| std::env::var(k).ok())
    }

    /// Testable variant of [`api_key`](Self::api_key) with an injected env lookup.
    pub fn api_key_with<F>(&self, get: F) -> Result<String, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |k: &String| !k.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| get(API_KEY_VAR).filter(present))
            .or_else(|| get(LEGACY_API_KEY_VAR).filter(present))
            .ok_or_else(|| DomainError::MissingCredential(API_KEY_VAR.to_string()))
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn resolver_model_or_default(&self) -> String {
        self.resolver_model
            .clone()
            .unwrap_or_else(|| DEFAULT_RESOLVER_MODEL.to_string())
    }

    pub fn commentary_model_or_default(&self) -> String {
        self.commentary_model
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMENTARY_MODEL.to_string())
    }

    /// Parsed resolver mode. Unset means deterministic.
    pub fn resolver_mode(&self) -> Result<ResolverMode, DomainError> {
        self.resolver_mode
            .as_deref()
            .map(str::parse::<ResolverMode>)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn use_mock(&self) -> bool {
        self.use_mock.unwrap_or(false)
    }

    /// Weight unit the form starts on. Unset means kilograms.
    ///
    /// # Errors
    /// `UnsupportedUnit` for a tag no unit answers to.
    pub fn default_weight_unit(&self) -> Result<WeightUnit, DomainError> {
        self.weight_unit
            .as_deref()
            .map_or(Ok(WeightUnit::Kilogram), str::parse)
    }

    /// Height unit the form starts on. Unset means centimeters.
    pub fn default_height_unit(&self) -> Result<HeightUnit, DomainError> {
        self.height_unit
            .as_deref()
            .map_or(Ok(HeightUnit::Centimeter), str::parse)
    }
}
