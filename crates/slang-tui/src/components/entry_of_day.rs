//! EntryOfDay component — the Home page "slang of the day" card.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use slang_core::entry::Entry;

use crate::{
    action::{Action, AudioControl, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_key_hint, style_muted, style_secondary, style_word, C_CATEGORY,
        C_FAVORITE, C_LANGUAGE, C_PLAYING,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct EntryOfDay;

impl EntryOfDay {
    pub fn new() -> Self {
        Self
    }
}

/// Text for the slang-of-the-day favorite control.
pub fn favorite_label(favorited: bool) -> &'static str {
    if favorited {
        "❤️ Remove from Favorites"
    } else {
        "❤️ Add to Favorites"
    }
}

/// `word — meaning`, the clipboard form of an entry.
pub fn clipboard_text(entry: &Entry) -> String {
    format!("{} — {}", entry.word, entry.meaning)
}

fn control_row<'a>(key: &'a str, label: &'a str, style: Style) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}] ", key), style_key_hint()),
        Span::styled(label, style),
        Span::raw("   "),
    ]
}

impl Component for EntryOfDay {
    fn id(&self) -> ComponentId {
        ComponentId::EntryOfDay
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let dict = &state.dictionary;
        if key.code == KeyCode::Char('r') {
            return vec![Action::RerollEntryOfDay];
        }
        let (Some(index), Some(entry)) = (dict.entry_of_the_day_index(), dict.entry_of_the_day())
        else {
            return vec![];
        };
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => {
                vec![Action::PlayAudio(index, AudioControl::EntryOfDay)]
            }
            KeyCode::Char('f') => vec![Action::ToggleFavorite(entry.id())],
            KeyCode::Char('y') => vec![Action::CopyToClipboard(clipboard_text(entry))],
            _ => vec![],
        }
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let Some(entry) = state.dictionary.entry_of_the_day() else {
            let block = pane_chrome("Slang of the day", focused, None);
            frame.render_widget(
                Paragraph::new("No slangs available.")
                    .style(style_muted())
                    .block(block),
                area,
            );
            return;
        };

        // Keep the card a readable width on wide terminals
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Max(72),
                Constraint::Min(0),
            ])
            .split(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Max(16), Constraint::Min(0)])
            .split(cols[1]);

        let block = pane_chrome(
            "Slang of the day",
            focused,
            Some(Badge {
                text: &entry.language,
                color: C_LANGUAGE,
            }),
        );

        let favorited = state.is_favorite(entry);
        let play_label = state.audio_label(&AudioControl::EntryOfDay);
        let play_style = if state.playing.as_ref() == Some(&AudioControl::EntryOfDay) {
            Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
        } else {
            style_default()
        };
        let fav_style = if favorited {
            Style::default().fg(C_FAVORITE).add_modifier(Modifier::BOLD)
        } else {
            style_default()
        };

        let mut controls = control_row("p", play_label, play_style);
        controls.extend(control_row("f", favorite_label(favorited), fav_style));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(entry.word.as_str(), style_word())),
            Line::from(vec![
                Span::styled(entry.language.as_str(), Style::default().fg(C_LANGUAGE)),
                Span::styled(" · ", style_muted()),
                Span::styled(entry.category.as_str(), Style::default().fg(C_CATEGORY)),
            ]),
            Line::from(""),
            Line::from(Span::styled(entry.meaning.as_str(), style_default())),
            Line::from(""),
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", entry.example_native),
                style_default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(entry.example_translation.as_str(), style_secondary())),
            Line::from(""),
            Line::from(controls),
            Line::from(vec![
                Span::styled("[r] ", style_key_hint()),
                Span::styled("another slang   ", style_secondary()),
                Span::styled("[y] ", style_key_hint()),
                Span::styled("copy", style_secondary()),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_core::entry::fallback_entries;

    #[test]
    fn test_favorite_label() {
        assert_eq!(favorite_label(false), "❤️ Add to Favorites");
        assert_eq!(favorite_label(true), "❤️ Remove from Favorites");
    }

    #[test]
    fn test_clipboard_text() {
        assert_eq!(
            clipboard_text(&fallback_entries()[8]),
            "Kaya — i dont know/whatever"
        );
    }
}
