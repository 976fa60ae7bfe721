//! Network and disk throughput plus filesystem usage.

use cybermon_sampler::MetricsSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
};

use crate::ui::theme::{GOOD, HOT, LABEL, STORAGE, SWAP_BAR};
use crate::ui::util::{bar, human, human_rate};

pub fn draw_storage(f: &mut ratatui::Frame<'_>, area: Rect, m: &MetricsSnapshot, disk_label: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(STORAGE))
        .title(Span::styled(
            "STORAGE & NET",
            Style::default().fg(STORAGE).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // rates table
            Constraint::Length(1), // spacer
            Constraint::Length(2), // disk usage
        ])
        .split(inner);

    let r = &m.rates;
    let label = Style::default().fg(LABEL).add_modifier(Modifier::BOLD);
    let rows = vec![
        Row::new(vec![
            Span::styled("NETWORK", label),
            Span::styled(format!("⬇ {}", human_rate(r.net_in_bps)), Style::default().fg(GOOD)),
            Span::styled(format!("⬆ {}", human_rate(r.net_out_bps)), Style::default().fg(SWAP_BAR)),
        ]),
        Row::new(vec![
            Span::styled("DISK I/O", label),
            Span::styled(format!("R: {}", human_rate(r.disk_read_bps)), Style::default().fg(GOOD)),
            Span::styled(format!("W: {}", human_rate(r.disk_write_bps)), Style::default().fg(SWAP_BAR)),
        ]),
    ];
    let header = Row::new(vec!["SOURCE", "IN / READ", "OUT / WRITE"])
        .style(Style::default().fg(Color::DarkGray));
    let table = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Min(12), Constraint::Min(12)],
    )
    .header(header)
    .column_spacing(2);
    f.render_widget(table, parts[0]);

    let white = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let lines = match m.disk_usage {
        Some(d) => {
            let color = if d.percent < 80.0 { GOOD } else { HOT };
            vec![
                Line::from(vec![
                    Span::styled(format!("Disk {disk_label}: "), white),
                    Span::styled(
                        format!("{} Free", human(d.free)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                bar(d.percent, color),
            ]
        }
        None => vec![Line::from(vec![
            Span::styled(format!("Disk {disk_label}: "), white),
            Span::styled("N/A", Style::default().fg(Color::DarkGray)),
        ])],
    };
    f.render_widget(Paragraph::new(lines), parts[2]);
}
