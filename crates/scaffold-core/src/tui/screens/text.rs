//! Free text entry

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    header: &str,
    value: &str,
    placeholder: &str,
    cursor: usize,
    help: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Input
            Constraint::Min(0),
            Constraint::Length(2), // Help
        ])
        .split(area);

    frame.render_widget(super::title(header), chunks[0]);

    let shown = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };
    let input = Paragraph::new(Line::from(vec![Span::raw("> "), shown]))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, chunks[1]);

    // border + "> "
    let offset = cursor_offset(value, cursor).saturating_add(3);
    let max_x = chunks[1].right().saturating_sub(2);
    frame.set_cursor_position((chunks[1].x.saturating_add(offset).min(max_x), chunks[1].y + 1));

    frame.render_widget(super::help(help), chunks[3]);
}

/// Terminal columns taken by the first `cursor` characters of `value`
fn cursor_offset(value: &str, cursor: usize) -> u16 {
    let width: usize = value
        .chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_offset_counts_columns() {
        assert_eq!(cursor_offset("", 0), 0);
        assert_eq!(cursor_offset("shop", 4), 4);
        assert_eq!(cursor_offset("shop", 2), 2);
        // each CJK character takes two columns
        assert_eq!(cursor_offset("店舗api", 2), 4);
        assert_eq!(cursor_offset("店舗api", 5), 7);
    }

    #[test]
    fn test_cursor_offset_ignores_zero_width() {
        // "e" followed by a combining acute accent
        assert_eq!(cursor_offset("e\u{301}x", 3), 2);
    }
}
