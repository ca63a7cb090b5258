//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Owns the plausibility bounds for human weight and height; the core only
//! checks mathematical validity.

use super::{progress, render};
use crate::domain::{
    BmiReading, ConversationSession, DomainError, HeightMeasurement, HeightUnit, Measurement,
    ResolverStrategy, WeightMeasurement, WeightUnit,
};
use crate::ports::InputPort;
use crate::usecases::AssessmentService;
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Accepted range and suggested value for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub fn weight_bounds(unit: WeightUnit) -> InputBounds {
    let (min, max, default) = match unit {
        WeightUnit::Kilogram => (30.0, 300.0, 70.0),
        WeightUnit::Pound => (66.0, 661.0, 154.0),
        WeightUnit::Stone => (4.7, 47.2, 11.0),
    };
    InputBounds { min, max, default }
}

pub fn height_bounds(unit: HeightUnit) -> InputBounds {
    let (min, max, default) = match unit {
        HeightUnit::Centimeter => (100.0, 250.0, 170.0),
        HeightUnit::Meter => (1.0, 2.5, 1.7),
        HeightUnit::Foot => (3.0, 8.0, 5.7),
        HeightUnit::Inch => (39.0, 96.0, 67.0),
    };
    InputBounds { min, max, default }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Calculate,
    Describe,
    About,
    Exit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuAction::Calculate => "Calculate BMI & Get Advice",
            MenuAction::Describe => "Describe my weight and height in words",
            MenuAction::About => "About BMI",
            MenuAction::Exit => "Exit",
        })
    }
}

/// Neon prompt theme for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("❯").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightMagenta))
        .with_help_message(StyleSheet::new().with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}

/// Esc and Ctrl-C are a way out, not an error.
fn cancelled(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn input_error(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

fn ask_magnitude(label: &str, tag: &str, bounds: InputBounds) -> Result<f64, InquireError> {
    let message = format!("{} ({}):", label, tag);
    let help = format!("Between {} and {} {}", bounds.min, bounds.max, tag);
    let InputBounds { min, max, .. } = bounds;
    CustomType::<f64>::new(&message)
        .with_default(bounds.default)
        .with_help_message(&help)
        .with_error_message("Please type a valid number")
        .with_validator(move |v: &f64| -> Result<Validation, CustomUserError> {
            if (min..=max).contains(v) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    format!("Please enter a value between {} and {}", min, max).into(),
                ))
            }
        })
        .prompt()
}

/// Index of `unit` in `all`, for the initial `Select` cursor.
fn cursor_of<T: PartialEq>(all: &[T], unit: &T) -> usize {
    all.iter().position(|u| u == unit).unwrap_or(0)
}

fn ask_measurements(
    weight_unit: WeightUnit,
    height_unit: HeightUnit,
) -> Result<(WeightMeasurement, HeightMeasurement), InquireError> {
    let weight_unit = Select::new("Weight unit", WeightUnit::ALL.to_vec())
        .with_starting_cursor(cursor_of(&WeightUnit::ALL, &weight_unit))
        .with_help_message("Select your preferred weight unit")
        .prompt()?;
    let weight = ask_magnitude("Weight", weight_unit.tag(), weight_bounds(weight_unit))?;

    let height_unit = Select::new("Height unit", HeightUnit::ALL.to_vec())
        .with_starting_cursor(cursor_of(&HeightUnit::ALL, &height_unit))
        .with_help_message("Select your preferred height unit")
        .prompt()?;
    let height = ask_magnitude("Height", height_unit.tag(), height_bounds(height_unit))?;

    Ok((
        Measurement::new(weight, weight_unit),
        Measurement::new(height, height_unit),
    ))
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<AssessmentService>,
    weight_unit: WeightUnit,
    height_unit: HeightUnit,
}

impl TuiInputPort {
    /// `weight_unit` and `height_unit` are preselected in the unit pickers.
    pub fn new(
        service: Arc<AssessmentService>,
        weight_unit: WeightUnit,
        height_unit: HeightUnit,
    ) -> Self {
        Self {
            service,
            weight_unit,
            height_unit,
        }
    }

    fn menu(&self) -> Vec<MenuAction> {
        let mut options = vec![MenuAction::Calculate];
        if self.service.resolver().strategy() == ResolverStrategy::Delegated {
            options.push(MenuAction::Describe);
        }
        options.extend([MenuAction::About, MenuAction::Exit]);
        options
    }

    async fn calculate(&self, session: &mut ConversationSession) -> Result<(), DomainError> {
        let (weight, height) = match ask_measurements(self.weight_unit, self.height_unit) {
            Ok(pair) => pair,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(input_error(e)),
        };

        let pb = progress::spinner("Converting units and calculating BMI...");
        let reading = self.service.measure(session, &weight, &height).await;
        pb.finish_and_clear();
        self.show(reading).await;
        Ok(())
    }

    async fn describe(&self, session: &mut ConversationSession) -> Result<(), DomainError> {
        let text = match Text::new("Give me your weight and height:")
            .with_placeholder("e.g. 11 stone and 5ft 7in")
            .prompt()
        {
            Ok(text) => text,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(input_error(e)),
        };

        let pb = progress::spinner("Converting units and calculating BMI...");
        let reading = self.service.measure_text(session, &text).await;
        pb.finish_and_clear();
        self.show(reading).await;
        Ok(())
    }

    /// Render the reading, then fetch and render commentary for it.
    async fn show(&self, reading: Result<BmiReading, DomainError>) {
        let reading = match reading {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "assessment failed");
                render::print_error("Error processing your input. Please try again.", &e);
                return;
            }
        };
        render::print_reading(&reading);

        let pb = progress::spinner("Getting sassy commentary and fashion advice...");
        let commentary = self.service.comment(reading.bmi).await;
        pb.finish_and_clear();
        render::print_commentary(&commentary);
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut session = self.service.new_session();
        loop {
            let action = match Select::new("What would you like to do?", self.menu()).prompt() {
                Ok(action) => action,
                Err(e) if cancelled(&e) => return Ok(()),
                Err(e) => return Err(input_error(e)),
            };
            match action {
                MenuAction::Calculate => self.calculate(&mut session).await?,
                MenuAction::Describe => self.describe(&mut session).await?,
                MenuAction::About => render::print_about(),
                MenuAction::Exit => return Ok(()),
            }
        }
    }
}
