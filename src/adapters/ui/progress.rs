//! Indicatif spinner shown while a request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner with a message, ticking on its own. Callers finish it with
/// `finish_and_clear` once the request resolves.
pub fn analysis_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.magenta} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
