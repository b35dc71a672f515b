//! Screen rendering

pub mod choice;
pub mod progress;
pub mod text;

pub use progress::ProgressScreen;

use crate::wizard::View;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw whichever step the navigator reports
pub fn render_view(frame: &mut Frame, area: Rect, view: &View<'_>) {
    match view {
        View::Choice {
            header,
            items,
            cursor,
            help,
            footer,
        } => choice::render(frame, area, header, items, *cursor, help, footer.as_deref()),
        View::Text {
            header,
            value,
            placeholder,
            cursor,
            help,
        } => text::render(frame, area, header, value, placeholder, *cursor, help),
    }
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::NONE))
}

fn help(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
}
