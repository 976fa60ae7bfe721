//! System health: load, uptime, battery, CPU with sparkline, RAM and swap.

use cybermon_sampler::MetricsSnapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::{ACCENT, GOOD, HOT, RAM_BAR, SWAP_BAR, WARN};
use crate::ui::util::{bar, fmt_uptime, human, sparkline};

const LABEL_W: usize = 10;

fn row(label: &str, value: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{label:<width$}", width = LABEL_W),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    spans.extend(value);
    Line::from(spans)
}

fn na() -> Vec<Span<'static>> {
    vec![Span::styled("N/A", Style::default().fg(Color::DarkGray))]
}

pub fn draw_system(f: &mut ratatui::Frame<'_>, area: Rect, m: &MetricsSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            "SYSTEM HEALTH",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let width = block.inner(area).width as usize;
    let white = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(12);

    let load = match m.load_avg {
        Some(l) => vec![
            Span::styled(format!("{:.2} ", l.one), Style::default().fg(GOOD)),
            Span::styled(format!("{:.2} ", l.five), Style::default().fg(WARN)),
            Span::styled(format!("{:.2}", l.fifteen), Style::default().fg(HOT)),
        ],
        None => na(),
    };
    lines.push(row("Load Avg", load));

    let uptime = m
        .uptime_secs
        .map(|s| vec![Span::styled(fmt_uptime(s), white)])
        .unwrap_or_else(na);
    lines.push(row("Uptime", uptime));

    if let Some(b) = m.battery {
        let icon = if b.plugged { "⚡" } else { "🔋" };
        let color = if b.percent > 20.0 { Color::Green } else { Color::Red };
        lines.push(row(
            "Battery",
            vec![Span::styled(format!("{icon} {:.0}%", b.percent), Style::default().fg(color))],
        ));
    }

    lines.push(Line::default());

    let cpu = m
        .cpu_percent
        .map(|c| vec![Span::styled(format!("{c:.1}%"), white)])
        .unwrap_or_else(na);
    lines.push(row("CPU Load", cpu));
    lines.push(sparkline(&m.cpu_history, width));

    lines.push(Line::default());
    match m.memory {
        Some(mem) => {
            lines.push(row("RAM Usage", bar(mem.percent, RAM_BAR).spans));
            lines.push(row(
                "",
                vec![Span::styled(
                    format!("{} / {}", human(mem.used), human(mem.total)),
                    Style::default().fg(Color::DarkGray),
                )],
            ));
        }
        None => lines.push(row("RAM Usage", na())),
    }

    // Hosts without swap get no row at all
    if let Some(swap) = m.swap.filter(|s| s.total > 0) {
        lines.push(row("Swap", bar(swap.percent, SWAP_BAR).spans));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
