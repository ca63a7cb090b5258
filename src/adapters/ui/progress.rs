//! Spinners shown while waiting on the generation collaborator.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a steadily ticking spinner with `message`. Finish it with
/// `finish_and_clear` once the awaited call returns.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.magenta} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]);
    pb.set_style(style);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
