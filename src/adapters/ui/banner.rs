//! Welcome banner with a vertical gradient (BMI STYLIST).
//! Uses figlet's built-in standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Runway Pink (#ff6b6b).
const RUNWAY_PINK: (u8, u8, u8) = (0xff, 0x6b, 0x6b);
/// Velvet Purple (#764ba2).
const VELVET_PURPLE: (u8, u8, u8) = (0x76, 0x4b, 0xa2);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints "BMI STYLIST" as figlet art shaded from pink to purple, then the version.
/// Falls back to a plain title if the font cannot be rendered.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("BMI STYLIST").map(|f| f.to_string()))
        .unwrap_or_else(|| "BMI STYLIST\n".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(RUNWAY_PINK, VELVET_PURPLE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: RUNWAY_PINK.0,
        g: RUNWAY_PINK.1,
        b: RUNWAY_PINK.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("BMI calculator with sassy commentary and fashion advice\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
