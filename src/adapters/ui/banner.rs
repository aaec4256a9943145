//! ASCII banner with gradient (LONGSHOT).
//!
//! Uses the figlet standard font; colors fade from electric blue to signal
//! green, matching the prompt theme.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use figlet_rs::FIGfont;
use std::io::{stdout, Write};

/// Electric Blue (#3b82f6).
const ELECTRIC_BLUE: (u8, u8, u8) = (0x3b, 0x82, 0xf6);
/// Signal Green (#4ade80).
const SIGNAL_GREEN: (u8, u8, u8) = (0x4a, 0xde, 0x80);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "LONGSHOT" in figlet ASCII with a gradient from
/// Electric Blue to Signal Green, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        return;
    };
    let Some(figure) = font.convert("LONGSHOT") else {
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(ELECTRIC_BLUE, SIGNAL_GREEN, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SIGNAL_GREEN.0,
        g: SIGNAL_GREEN.1,
        b: SIGNAL_GREEN.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Extracts text from chats & diagrams\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_rgb(ELECTRIC_BLUE, SIGNAL_GREEN, 0.0), ELECTRIC_BLUE);
        assert_eq!(lerp_rgb(ELECTRIC_BLUE, SIGNAL_GREEN, 1.0), SIGNAL_GREEN);
    }
}
