//! One-line footer with the host name.

use cybermon_sampler::MetricsSnapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, m: &MetricsSnapshot) {
    let text = format!(
        "System: {} ({}) | Press q or Ctrl+C to exit",
        m.host.node, m.host.os
    );
    let p = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .centered();
    f.render_widget(p, area);
}
