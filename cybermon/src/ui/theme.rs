//! Shared UI colours.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Cyan;
pub const PROCS: Color = Color::Magenta;
pub const STORAGE: Color = Color::Green;
pub const LABEL: Color = Color::Yellow;
pub const GOOD: Color = Color::Rgb(0, 255, 135);
pub const WARN: Color = Color::Rgb(255, 215, 0);
pub const HOT: Color = Color::Rgb(215, 0, 95);
pub const RAM_BAR: Color = Color::LightMagenta;
pub const SWAP_BAR: Color = Color::Rgb(0, 175, 255);

/// Green below 50%, yellow below 80%, red above.
pub fn load_color(pct: f32) -> Color {
    if pct < 50.0 {
        GOOD
    } else if pct < 80.0 {
        WARN
    } else {
        HOT
    }
}
