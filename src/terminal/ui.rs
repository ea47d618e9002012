use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::terminal::state::AppState;

const LOADING_PLACEHOLDER: &str = "Loading summary...";

pub fn render(f: &mut Frame, state: &mut AppState) {
    let [list_area, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .margin(1)
            .areas(f.area());

    let list_block = Block::default()
        .title(format!(
            " {} ({}) ",
            state.folder_name,
            state.threads.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let items: Vec<ListItem> = state
        .threads
        .iter()
        .map(|t| {
            let summary_span = if state.is_loading(t.id) {
                Span::styled(
                    LOADING_PLACEHOLDER,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
            } else {
                Span::styled(
                    state.summary(t.id).unwrap_or("").to_string(),
                    Style::default().fg(Color::Gray),
                )
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<24.24}", t.latest_sender()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:<32.32}", t.subject),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                summary_span,
                Span::raw("  "),
                Span::styled(
                    t.last_activity_date().to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    f.render_stateful_widget(list, list_area, &mut state.list_state);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("j/k", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" move  "),
        Span::styled("r", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" reload  "),
        Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]));
    f.render_widget(hint, footer);
}
