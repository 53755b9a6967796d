//! SlangList component — the Dictionary page.
//!
//! Layout (inside one bordered pane):
//!   search bar
//!   language / category / favorites selectors
//!   entry cards (LIMITED or EXPANDED slice of the filtered view)
//!   summary + view-all control

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use slang_core::entry::Entry;
use slang_core::filter::FavoritesScope;

use crate::{
    action::{Action, AudioControl, ComponentId},
    app_state::AppState,
    component::Component,
    components::entry_of_day::clipboard_text,
    theme::{
        style_default, style_key_hint, style_muted, style_secondary, style_selected, style_word,
        C_CATEGORY, C_FAVORITE, C_GREEN, C_LANGUAGE, C_ORANGE, C_PLAYING,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::pane_chrome,
        status_bar::draw_separator,
    },
};

const PAGE_STEP: usize = 5;

pub struct SlangList {
    pub filter_input: FilterInput,
    selected: usize,
    list_state: ListState,
}

impl SlangList {
    pub fn new() -> Self {
        Self {
            filter_input: FilterInput::new("search slangs, meanings, examples…"),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Selection clamped to the visible slice.  `None` when nothing is shown.
    fn selected_index(&self, visible_len: usize) -> Option<usize> {
        if visible_len == 0 {
            None
        } else {
            Some(self.selected.min(visible_len - 1))
        }
    }

    fn selected_entry<'a>(&self, state: &'a AppState) -> Option<(usize, &'a Entry)> {
        let visible = state.dictionary.visible_entries();
        let i = self.selected_index(visible.len())?;
        visible.get(i).copied()
    }
}

fn selector<'a>(key: &'a str, label: &'a str, value: String, set: bool) -> Vec<Span<'a>> {
    let value_style = if set {
        Style::default().fg(C_ORANGE).add_modifier(Modifier::BOLD)
    } else {
        style_secondary()
    };
    vec![
        Span::styled(format!("[{}] ", key), style_key_hint()),
        Span::styled(format!("{}: ", label), style_muted()),
        Span::styled(value, value_style),
        Span::raw("   "),
    ]
}

fn card<'a>(entry: &'a Entry, favorited: bool, audio_label: &'a str, playing: bool) -> ListItem<'a> {
    let heart = if favorited {
        Span::styled("❤ ", Style::default().fg(C_FAVORITE))
    } else {
        Span::styled("♡ ", style_muted())
    };
    let audio_style = if playing {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else {
        style_secondary()
    };
    ListItem::new(vec![
        Line::from(vec![
            heart,
            Span::styled(entry.word.as_str(), style_word()),
            Span::raw("  "),
            Span::styled(entry.language.as_str(), Style::default().fg(C_LANGUAGE)),
            Span::styled(" · ", style_muted()),
            Span::styled(entry.category.as_str(), Style::default().fg(C_CATEGORY)),
        ]),
        Line::from(Span::styled(format!("  {}", entry.meaning), style_default())),
        Line::from(vec![
            Span::styled(
                format!("  {}", entry.example_native),
                style_default().add_modifier(Modifier::ITALIC),
            ),
            Span::styled(format!("  {}", entry.example_translation), style_secondary()),
        ]),
        Line::from(Span::styled(format!("  {}", audio_label), audio_style)),
        Line::from(""),
    ])
}

impl Component for SlangList {
    fn id(&self) -> ComponentId {
        ComponentId::SlangList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if self.filter_input.is_active() {
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(text) => vec![Action::SearchChanged(text)],
                FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseSearch],
                FilterAction::None => vec![],
            };
        }

        match key.code {
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Up | KeyCode::Char('k') => return vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => return vec![Action::SelectDown(1)],
            KeyCode::PageUp => return vec![Action::SelectUp(PAGE_STEP)],
            KeyCode::PageDown => return vec![Action::SelectDown(PAGE_STEP)],
            KeyCode::Home | KeyCode::Char('g') => return vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => return vec![Action::SelectLast],
            KeyCode::Char('l') => return vec![Action::CycleLanguage],
            KeyCode::Char('c') => return vec![Action::CycleCategory],
            KeyCode::Char('F') => return vec![Action::ToggleScope],
            KeyCode::Char('x') => return vec![Action::ClearFilters],
            KeyCode::Char('v') => return vec![Action::ToggleViewAll],
            _ => {}
        }

        let Some((index, entry)) = self.selected_entry(state) else {
            return vec![];
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char('p') => {
                vec![Action::PlayAudio(index, AudioControl::Card(index))]
            }
            KeyCode::Char('f') => vec![Action::ToggleFavorite(entry.id())],
            KeyCode::Char('y') => vec![Action::CopyToClipboard(clipboard_text(entry))],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        let visible_len = state.dictionary.view().visible().len();
        match action {
            Action::OpenSearch => self.filter_input.activate(),
            Action::CloseSearch => self.filter_input.deactivate(),
            Action::SelectUp(n) => {
                self.selected = self
                    .selected_index(visible_len)
                    .unwrap_or(0)
                    .saturating_sub(*n);
            }
            Action::SelectDown(n) => {
                self.selected = (self.selected + n).min(visible_len.saturating_sub(1));
            }
            Action::SelectFirst => self.selected = 0,
            Action::SelectLast => self.selected = visible_len.saturating_sub(1),
            Action::ClearFilters => {
                self.filter_input.clear();
                self.selected = 0;
            }
            Action::SearchChanged(_)
            | Action::CycleLanguage
            | Action::CycleCategory
            | Action::ToggleScope
            | Action::ToggleViewAll => self.selected = 0,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("Dictionary", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        self.filter_input.draw(frame, rows[0]);

        let dict = &state.dictionary;
        let criteria = dict.criteria();
        let mut spans = selector(
            "l",
            "Language",
            criteria.language.clone().unwrap_or_else(|| "All".into()),
            criteria.language.is_some(),
        );
        spans.extend(selector(
            "c",
            "Category",
            criteria.category.clone().unwrap_or_else(|| "All".into()),
            criteria.category.is_some(),
        ));
        spans.extend(selector(
            "F",
            "Show",
            criteria.scope.label().to_string(),
            criteria.scope == FavoritesScope::Favorites,
        ));
        if !criteria.is_empty() {
            spans.push(Span::styled("[x] ", style_key_hint()));
            spans.push(Span::styled("clear", style_muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
        draw_separator(frame, rows[2]);

        let view = dict.view();
        if view.is_empty() {
            let msg = vec![
                Line::from(""),
                Line::from(Span::styled("No slangs found.", style_default())),
                Line::from(Span::styled(
                    "Try adjusting your search or filters.",
                    style_muted(),
                )),
            ];
            frame.render_widget(Paragraph::new(msg).centered(), rows[3]);
        } else {
            let visible = dict.visible_entries();
            let items: Vec<ListItem> = visible
                .iter()
                .map(|(index, entry)| {
                    let control = AudioControl::Card(*index);
                    card(
                        entry,
                        state.is_favorite(entry),
                        state.audio_label(&control),
                        state.playing.as_ref() == Some(&control),
                    )
                })
                .collect();
            self.list_state.select(self.selected_index(visible.len()));
            let list = List::new(items)
                .highlight_style(style_selected())
                .highlight_symbol("▌");
            frame.render_stateful_widget(list, rows[3], &mut self.list_state);
        }

        let mut footer = vec![Span::styled(view.summary(), style_secondary())];
        if view.has_more() {
            footer.push(Span::raw("   "));
            footer.push(Span::styled("[v] ", style_key_hint()));
            footer.push(Span::styled(
                view.toggle_label(),
                Style::default().fg(C_GREEN),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(footer)), rows[4]);
    }
}
