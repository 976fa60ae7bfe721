//! Title bar with the local clock.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::{ACCENT, GOOD};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .split(inner);

    let title = Line::from(vec![
        Span::styled(
            " ⚡ CYBER-MONITOR ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), cols[0]);

    let clock = Line::from(vec![
        Span::styled("press q to quit  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            Local::now().format("%H:%M:%S").to_string(),
            Style::default().fg(GOOD).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(clock).right_aligned(), cols[1]);
}
