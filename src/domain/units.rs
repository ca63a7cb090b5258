//! Unit tags and the conversion table.
//!
//! Every conversion factor used anywhere in the crate lives here.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pounds in one kilogram.
pub const LB_PER_KG: f64 = 2.20462;
/// Kilograms in one stone (14 lb).
pub const KG_PER_STONE: f64 = 6.35;
/// Centimeters in one meter.
pub const CM_PER_M: f64 = 100.0;
/// Feet in one meter.
pub const FT_PER_M: f64 = 3.28084;
/// Inches in one meter.
pub const IN_PER_M: f64 = 39.3701;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kilogram,
    Pound,
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Centimeter,
    Meter,
    Foot,
    Inch,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 3] = [
        WeightUnit::Kilogram,
        WeightUnit::Pound,
        WeightUnit::Stone,
    ];

    /// Kilograms per one of this unit.
    fn kg_factor(self) -> f64 {
        match self {
            WeightUnit::Kilogram => 1.0,
            WeightUnit::Pound => 1.0 / LB_PER_KG,
            WeightUnit::Stone => KG_PER_STONE,
        }
    }

    pub fn to_kilograms(self, magnitude: f64) -> f64 {
        magnitude * self.kg_factor()
    }

    pub fn from_kilograms(self, kg: f64) -> f64 {
        kg / self.kg_factor()
    }

    /// Short tag shown to users and sent to the collaborator.
    pub fn tag(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lbs",
            WeightUnit::Stone => "stones",
        }
    }
}

impl HeightUnit {
    pub const ALL: [HeightUnit; 4] = [
        HeightUnit::Centimeter,
        HeightUnit::Meter,
        HeightUnit::Foot,
        HeightUnit::Inch,
    ];

    /// Units of this kind per meter.
    fn per_meter(self) -> f64 {
        match self {
            HeightUnit::Centimeter => CM_PER_M,
            HeightUnit::Meter => 1.0,
            HeightUnit::Foot => FT_PER_M,
            HeightUnit::Inch => IN_PER_M,
        }
    }

    pub fn to_meters(self, magnitude: f64) -> f64 {
        magnitude / self.per_meter()
    }

    pub fn from_meters(self, meters: f64) -> f64 {
        meters * self.per_meter()
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeightUnit::Centimeter => "cm",
            HeightUnit::Meter => "meters",
            HeightUnit::Foot => "feet",
            HeightUnit::Inch => "inches",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts the display tag plus common spellings, case-insensitive. This is how
/// unit tags from configuration enter the crate.
impl FromStr for WeightUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilogram),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pound),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(DomainError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(HeightUnit::Centimeter)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(HeightUnit::Meter),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Foot),
            "in" | "inch" | "inches" => Ok(HeightUnit::Inch),
            _ => Err(DomainError::UnsupportedUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pound_round_trip() {
        let kg = WeightUnit::Pound.to_kilograms(154.0);
        let lbs = WeightUnit::Pound.from_kilograms(kg);
        assert!((lbs - 154.0).abs() < 0.01);
        assert!((kg - 69.853).abs() < 0.001);
    }

    #[test]
    fn test_weight_factors() {
        assert_eq!(WeightUnit::Kilogram.to_kilograms(70.0), 70.0);
        assert!((WeightUnit::Stone.to_kilograms(11.0) - 69.85).abs() < 1e-9);
        assert!((WeightUnit::Pound.to_kilograms(LB_PER_KG) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_height_factors() {
        assert!((HeightUnit::Centimeter.to_meters(170.0) - 1.7).abs() < 1e-12);
        assert_eq!(HeightUnit::Meter.to_meters(1.75), 1.75);
        assert!((HeightUnit::Inch.to_meters(67.0) - 1.70180).abs() < 1e-4);
        assert!((HeightUnit::Foot.to_meters(FT_PER_M) - 1.0).abs() < 1e-12);
        assert!((HeightUnit::Foot.from_meters(HeightUnit::Foot.to_meters(5.7)) - 5.7).abs() < 1e-9);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kilogram);
        assert_eq!(" lbs ".parse::<WeightUnit>().unwrap(), WeightUnit::Pound);
        assert_eq!("stones".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert_eq!("metres".parse::<HeightUnit>().unwrap(), HeightUnit::Meter);
        assert_eq!("feet".parse::<HeightUnit>().unwrap(), HeightUnit::Foot);
        assert_eq!("in".parse::<HeightUnit>().unwrap(), HeightUnit::Inch);
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "furlong".parse::<HeightUnit>().unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedUnit(ref t) if t == "furlong"));
        assert!(matches!(
            "grams".parse::<WeightUnit>(),
            Err(DomainError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_display_tags_parse_back() {
        for unit in WeightUnit::ALL {
            assert_eq!(unit.to_string().parse::<WeightUnit>().unwrap(), unit);
        }
        for unit in HeightUnit::ALL {
            assert_eq!(unit.to_string().parse::<HeightUnit>().unwrap(), unit);
        }
    }
}
