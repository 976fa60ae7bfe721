//! Small UI helpers: human-readable sizes, bars, sparklines, truncation.

use cybermon_sampler::spark_level;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::load_color;

pub const BAR_WIDTH: usize = 20;
const SPARK: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn human(b: u64) -> String {
    const K: f64 = 1024.0;
    let b = b as f64;
    if b < K { return format!("{b:.1}B"); }
    let kb = b / K;
    if kb < K { return format!("{kb:.1}KB"); }
    let mb = kb / K;
    if mb < K { return format!("{mb:.1}MB"); }
    let gb = mb / K;
    if gb < K { return format!("{gb:.1}GB"); }
    let tb = gb / K;
    format!("{tb:.2}TB")
}

pub fn human_rate(bps: f64) -> String {
    format!("{}/s", human(bps.max(0.0).round() as u64))
}

/// `HH:MM:SS`, with a day count in front once past 24h.
pub fn fmt_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let (h, m, s) = ((secs % 86_400) / 3_600, (secs % 3_600) / 60, secs % 60);
    if days > 0 {
        format!("{days}d {h:02}:{m:02}:{s:02}")
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// A fixed-width bar followed by the percentage.
pub fn bar(pct: f32, color: Color) -> Line<'static> {
    let filled = ((BAR_WIDTH as f32 * pct / 100.0) as usize).min(BAR_WIDTH);
    Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(color)),
        Span::raw(" ".repeat(BAR_WIDTH - filled)),
        Span::styled(
            format!(" {pct:.1}%"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// One glyph per sample, newest on the right; only the last `width` fit.
pub fn sparkline(history: &[f32], width: usize) -> Line<'static> {
    let start = history.len().saturating_sub(width);
    Line::from(
        history[start..]
            .iter()
            .map(|&v| {
                let glyph = SPARK[spark_level(v, SPARK.len())];
                Span::styled(glyph.to_string(), Style::default().fg(load_color(v)))
            })
            .collect::<Vec<_>>(),
    )
}
