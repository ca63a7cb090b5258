//! Result card and info panels. Plain stdout with crossterm colors.

use crate::domain::units::{CM_PER_M, FT_PER_M, IN_PER_M, KG_PER_STONE, LB_PER_KG};
use crate::domain::{BmiCategory, BmiReading, CommentaryResult, DomainError};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{Stdout, Write, stdout};

const MUTED: Color = Color::Rgb {
    r: 0x66,
    g: 0x66,
    b: 0x66,
};
const ACCENT: Color = Color::Rgb {
    r: 0xff,
    g: 0x6b,
    b: 0x6b,
};
const GOLD: Color = Color::Rgb {
    r: 0xff,
    g: 0xc1,
    b: 0x07,
};
const ERROR: Color = Color::Rgb {
    r: 0xe7,
    g: 0x4c,
    b: 0x3c,
};

pub fn category_color(category: BmiCategory) -> Color {
    let (r, g, b) = match category {
        BmiCategory::Underweight => (0x34, 0x98, 0xdb),
        BmiCategory::Normal => (0x2e, 0xcc, 0x71),
        BmiCategory::Overweight => (0xf3, 0x9c, 0x12),
        BmiCategory::Obese => (0xe7, 0x4c, 0x3c),
    };
    Color::Rgb { r, g, b }
}

fn colored(out: &mut Stdout, color: Color, text: &str) {
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
}

fn heading(out: &mut Stdout, color: Color, text: &str) {
    let _ = out.execute(SetAttribute(Attribute::Bold));
    colored(out, color, text);
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(Print("\r\n"));
}

/// BMI to one decimal, the category in its color, and the normalized inputs.
pub fn print_reading(reading: &BmiReading) {
    let mut out = stdout();
    let _ = out.execute(Print("\r\n"));
    heading(&mut out, ACCENT, "Your BMI Result");
    let color = category_color(reading.category);
    let _ = out.execute(SetAttribute(Attribute::Bold));
    colored(&mut out, color, &format!("  {:.1}  ", reading.bmi));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    colored(&mut out, color, reading.category.label());
    let _ = out.execute(Print("\r\n"));
    colored(
        &mut out,
        MUTED,
        &format!(
            "  {:.2} kg, {:.3} m ({} conversion)\r\n\r\n",
            reading.normalized.weight_kg, reading.normalized.height_m, reading.strategy
        ),
    );
    let _ = out.flush();
}

/// Each block shows its text, or its own error in place of the text.
pub fn print_commentary(commentary: &CommentaryResult) {
    print_block(
        "BMI Commentary",
        ACCENT,
        &commentary.critique,
        "Error getting BMI commentary",
    );
    print_block(
        "Fashion Stylist Advice",
        GOLD,
        &commentary.style_advice,
        "Error getting fashion advice",
    );
}

fn print_block(title: &str, color: Color, result: &Result<String, DomainError>, failure: &str) {
    let mut out = stdout();
    heading(&mut out, color, title);
    match result {
        Ok(text) => {
            for line in text.lines() {
                colored(&mut out, color, "│ ");
                let _ = out.execute(Print(line));
                let _ = out.execute(Print("\r\n"));
            }
        }
        Err(e) => colored(&mut out, ERROR, &format!("{}: {}\r\n", failure, e)),
    }
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

pub fn print_error(context: &str, err: &DomainError) {
    let mut out = stdout();
    colored(&mut out, ERROR, &format!("{} ({})\r\n\r\n", context, err));
    let _ = out.flush();
}

/// Categories, formula and conversion table.
pub fn print_about() {
    let mut out = stdout();
    let _ = out.execute(Print("\r\n"));
    heading(&mut out, ACCENT, "About BMI");
    for category in [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ] {
        colored(
            &mut out,
            category_color(category),
            &format!("  {:<14}", category.label()),
        );
        let _ = out.execute(Print(format!("{}\r\n", category.range())));
    }
    let _ = out.execute(Print("  BMI = weight (kg) ÷ height² (m²)\r\n\r\n"));

    heading(&mut out, ACCENT, "Unit Conversions");
    let _ = out.execute(Print(format!(
        "  1 kg = {} lbs\r\n  1 stone = 14 lbs = {} kg\r\n  1 m = {} cm = {} ft = {} in\r\n  1 ft = 12 in\r\n\r\n",
        LB_PER_KG, KG_PER_STONE, CM_PER_M, FT_PER_M, IN_PER_M
    )));

    colored(
        &mut out,
        MUTED,
        "  BMI is a screening tool, not a diagnostic tool. Muscle mass and body\r\n  composition aren't considered. Consult healthcare professionals for\r\n  accurate health assessments.\r\n\r\n",
    );
    let _ = out.flush();
}
