//! Render loop: input handling and repainting the latest snapshot at a fixed
//! frame rate. Sampling happens elsewhere; this loop never triggers a sample.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cybermon_sampler::{LatestSnapshot, MetricsSnapshot};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::sleep;

use crate::ui::{
    footer::draw_footer, header::draw_header, processes::draw_top_processes,
    storage::draw_storage, system::draw_system,
};

pub struct App {
    frame_interval: Duration,
    disk_label: String,
    should_quit: bool,
}

impl App {
    pub fn new(frame_interval: Duration, disk_label: String) -> Self {
        Self {
            frame_interval,
            disk_label,
            should_quit: false,
        }
    }

    pub async fn run(&mut self, latest: LatestSnapshot) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // SIGINT outside raw mode (e.g. sent by another process) ends the loop too
        let res = tokio::select! {
            r = self.event_loop(&mut terminal, latest) => r,
            _ = tokio::signal::ctrl_c() => Ok(()),
        };

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        latest: LatestSnapshot,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if is_quit_key(&k) {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            let snap = latest.borrow().clone();
            terminal.draw(|f| self.draw(f, &snap))?;

            // Frame rate
            sleep(self.frame_interval).await;
        }
        Ok(())
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>, m: &MetricsSnapshot) {
        let area = f.area();

        // Root rows: header, body, footer
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(8),    // body
                Constraint::Length(1), // footer
            ])
            .split(area);

        draw_header(f, rows[0]);

        // Body: system health (left) | processes over storage & net (right)
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
            .split(rows[1]);
        draw_system(f, body[0], m);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
            .split(body[1]);
        draw_top_processes(f, right[0], m);
        draw_storage(f, right[1], m, &self.disk_label);

        draw_footer(f, rows[2], m);
    }
}

fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
