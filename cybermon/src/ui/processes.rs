//! Top processes table.

use cybermon_sampler::MetricsSnapshot;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
};

use crate::ui::theme::{GOOD, PROCS, WARN};
use crate::ui::util::truncate_chars;

const NAME_MAX: usize = 15;

const COLS: [Constraint; 4] = [
    Constraint::Length(7), // PID
    Constraint::Min(8),    // Task
    Constraint::Length(7), // CPU %
    Constraint::Length(7), // Mem %
];

pub fn draw_top_processes(f: &mut ratatui::Frame<'_>, area: Rect, m: &MetricsSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PROCS))
        .title(Span::styled(
            "TOP PROCESSES",
            Style::default().fg(PROCS).add_modifier(Modifier::BOLD),
        ));

    let rows: Vec<Row> = if m.process_top.is_empty() {
        vec![Row::new(vec!["-", "Scanning...", "-", "-"])]
    } else {
        m.process_top
            .iter()
            .map(|p| {
                let name = if p.name.is_empty() { "?" } else { p.name.as_str() };
                Row::new(vec![
                    Cell::from(p.pid.to_string()).style(Style::default().fg(Color::DarkGray)),
                    Cell::from(truncate_chars(name, NAME_MAX)).style(
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Cell::from(format!("{:>6.1}", p.cpu_percent)).style(Style::default().fg(GOOD)),
                    Cell::from(format!("{:>6.1}", p.memory_percent)).style(Style::default().fg(WARN)),
                ])
            })
            .collect()
    };

    let header = Row::new(vec!["PID", "TASK", "  CPU%", "  MEM%"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );

    let table = Table::new(rows, COLS).header(header).column_spacing(1).block(block);
    f.render_widget(table, area);
}
