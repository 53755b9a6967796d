//! Header component — 1-row top bar.
//!
//! Left: app title and page tabs.  Right: offline badge, favorites count,
//! and the word currently playing (if any).
//!
//! Not focusable.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, AudioControl, ComponentId, Page},
    app_state::AppState,
    component::Component,
    theme::{C_FAVORITE, C_GREEN, C_MUTED, C_ORANGE, C_PLAYING, C_PRIMARY, C_SECONDARY},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

fn playing_word(state: &AppState) -> Option<&str> {
    let dict = &state.dictionary;
    match state.playing.as_ref()? {
        AudioControl::EntryOfDay => dict.entry_of_the_day().map(|e| e.word.as_str()),
        AudioControl::Card(index) => dict.store().get(*index).map(|e| e.word.as_str()),
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let mut left = vec![
            Span::styled(
                " Zed Slangs ",
                Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│", Style::default().fg(C_MUTED)),
        ];
        for (i, page) in Page::ALL.iter().enumerate() {
            let style = if *page == state.page {
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            left.push(Span::styled(format!(" {} ", i + 1), Style::default().fg(C_MUTED)));
            left.push(Span::styled(page.title(), style));
            left.push(Span::raw(" "));
        }

        let mut right = Vec::new();
        if let Some(word) = playing_word(state) {
            right.push(Span::styled(
                format!("♪ {} ", word),
                Style::default().fg(C_PLAYING),
            ));
        }
        if state.offline() {
            right.push(Span::styled(
                " OFFLINE SAMPLE ",
                Style::default().fg(C_ORANGE).add_modifier(Modifier::BOLD),
            ));
        }
        right.push(Span::styled(
            format!(" ❤ {} ", state.dictionary.favorites().len()),
            Style::default().fg(C_FAVORITE),
        ));

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(area);
        frame.render_widget(Paragraph::new(Line::from(left)), cols[0]);
        frame.render_widget(
            Paragraph::new(Line::from(right).right_aligned()),
            cols[1],
        );
    }
}
