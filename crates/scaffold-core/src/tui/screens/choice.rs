//! Single and multi choice lists

use crate::wizard::ViewItem;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    header: &str,
    items: &[ViewItem<'_>],
    cursor: usize,
    help: &str,
    footer: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Choices
            Constraint::Length(if footer.is_some() { 3 } else { 0 }),
            Constraint::Length(2), // Help
        ])
        .split(area);

    frame.render_widget(super::title(header), chunks[0]);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let highlighted = i == cursor;
            let style = if highlighted {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let prefix = if highlighted { "▶ " } else { "  " };

            let mut spans = vec![Span::raw(prefix)];
            if let Some(checked) = item.checked {
                let checkbox = if checked { "[✓]" } else { "[ ]" };
                spans.push(Span::styled(checkbox, style));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(item.label, style));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(cursor));
    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(footer) = footer {
        let footer = Paragraph::new(Span::styled(footer, Style::default().fg(Color::Green)))
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(footer, chunks[2]);
    }

    frame.render_widget(super::help(help), chunks[3]);
}
