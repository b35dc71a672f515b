//! Build progress screen

use crate::build::{BuildHandle, BuildReport};
use crate::error::ScaffoldError;
use crate::project::ProgressSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Where the build is, as far as the screen knows
pub enum BuildState {
    Running,
    Succeeded(BuildReport),
    Failed(ScaffoldError),
}

pub struct ProgressScreen {
    handle: BuildHandle,
    snapshot: ProgressSnapshot,
    state: BuildState,
}

impl ProgressScreen {
    pub fn new(handle: BuildHandle) -> Self {
        let snapshot = handle.progress().snapshot();
        Self {
            handle,
            snapshot,
            state: BuildState::Running,
        }
    }

    /// Refresh the snapshot and pick up the build result once it lands
    pub fn tick(&mut self) {
        if matches!(self.state, BuildState::Running) {
            match self.handle.try_finished() {
                Some(Ok(report)) => self.state = BuildState::Succeeded(report),
                Some(Err(e)) => self.state = BuildState::Failed(e),
                None => {}
            }
        }
        self.snapshot = self.handle.progress().snapshot();
    }

    /// A successful build closes the screen by itself; a running or failed
    /// one waits for a key
    pub fn should_close(&self, key_pressed: bool) -> bool {
        key_pressed || matches!(self.state, BuildState::Succeeded(_))
    }

    pub fn into_state(self) -> BuildState {
        self.state
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(6),    // Status
                Constraint::Length(3), // Gauge
                Constraint::Length(2), // Help
            ])
            .split(area);

        let (heading, color) = match &self.state {
            BuildState::Running => ("Building project", Color::Cyan),
            BuildState::Succeeded(_) => ("Project created", Color::Green),
            BuildState::Failed(_) => ("Build failed", Color::Red),
        };
        let title = Paragraph::new(heading)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(title, chunks[0]);

        let status_style = match self.state {
            BuildState::Failed(_) => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        let status = Paragraph::new(self.snapshot.status.as_str())
            .style(status_style)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, chunks[1]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(self.snapshot.fraction.clamp(0.0, 1.0));
        frame.render_widget(gauge, chunks[2]);

        frame.render_widget(super::help("Press any key to quit"), chunks[3]);
    }
}
