//! SubmitForm component — the Submit page.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use slang_core::submission::{SubmissionDraft, SubmissionField};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_key_hint, style_muted, style_secondary, C_FILTER_BG, C_FILTER_FG,
        C_GREEN, C_RED,
    },
    widgets::pane_chrome::pane_chrome,
};

const LABEL_WIDTH: u16 = 20;

pub struct SubmitForm {
    /// One input per `SubmissionField::ALL` entry.
    inputs: Vec<Input>,
    focus: usize,
    editing: bool,
    invalid: Option<SubmissionField>,
}

impl SubmitForm {
    pub fn new() -> Self {
        Self {
            inputs: SubmissionField::ALL.iter().map(|_| Input::default()).collect(),
            focus: 0,
            editing: false,
            invalid: None,
        }
    }

    pub fn draft(&self) -> SubmissionDraft {
        let mut draft = SubmissionDraft::default();
        for (field, input) in SubmissionField::ALL.iter().zip(&self.inputs) {
            draft.set_field(*field, input.value().to_string());
        }
        draft
    }

    fn reset(&mut self) {
        for input in &mut self.inputs {
            *input = Input::default();
        }
        self.focus = 0;
        self.editing = false;
        self.invalid = None;
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    fn is_last(&self) -> bool {
        self.focus + 1 == self.inputs.len()
    }
}

impl Component for SubmitForm {
    fn id(&self) -> ComponentId {
        ComponentId::SubmitForm
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if !self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Char('i') => return vec![Action::BeginEdit],
                KeyCode::Up | KeyCode::Char('k') => self.focus_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.focus_next(),
                _ => {}
            }
            return vec![];
        }

        match key.code {
            KeyCode::Esc => vec![Action::EndEdit],
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::Submit(self.draft())]
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                vec![]
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                vec![]
            }
            KeyCode::Enter if self.is_last() => vec![Action::Submit(self.draft())],
            KeyCode::Enter => {
                self.focus_next();
                vec![]
            }
            _ => {
                if let Some(input) = self.inputs.get_mut(self.focus) {
                    input.handle_event(&Event::Key(key));
                }
                if self.invalid == SubmissionField::ALL.get(self.focus).copied() {
                    self.invalid = None;
                }
                vec![]
            }
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::BeginEdit => self.editing = true,
            Action::EndEdit => self.editing = false,
            Action::SubmissionAccepted => self.reset(),
            Action::SubmissionRejected(field) => {
                if let Some(pos) = SubmissionField::ALL.iter().position(|f| f == field) {
                    self.focus = pos;
                }
                self.invalid = Some(*field);
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let block = pane_chrome("Submit a slang", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(SubmissionField::ALL.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Know a slang that's missing? Send it in and we'll review it.",
                style_secondary(),
            ))),
            rows[0],
        );

        for (i, (field, input)) in SubmissionField::ALL.iter().zip(&self.inputs).enumerate() {
            let row = rows[i + 1];
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
                .split(row);

            let is_focus = i == self.focus;
            let label_style = if self.invalid == Some(*field) {
                Style::default().fg(C_RED).add_modifier(Modifier::BOLD)
            } else if is_focus {
                Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD)
            } else {
                style_secondary()
            };
            let marker = if field.is_required() { "*" } else { " " };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{}{}", field.label(), marker),
                    label_style,
                ))),
                cols[0],
            );

            let width = cols[1].width.saturating_sub(1) as usize;
            let scroll = input.visual_scroll(width);
            let shown: String = input.value().chars().skip(scroll).collect();
            let value_style = if is_focus && self.editing {
                Style::default().fg(C_FILTER_FG).bg(C_FILTER_BG)
            } else {
                style_default().bg(C_FILTER_BG)
            };
            frame.render_widget(Paragraph::new(shown).style(value_style), cols[1]);

            if is_focus && self.editing && cols[1].width > 0 {
                let x = cols[1].x + input.visual_cursor().saturating_sub(scroll) as u16;
                frame.set_cursor_position((x.min(cols[1].x + cols[1].width - 1), cols[1].y));
            }
        }

        let hint = if self.editing {
            vec![
                Span::styled("[Ctrl+S] ", style_key_hint()),
                Span::styled("submit   ", style_muted()),
                Span::styled("[Esc] ", style_key_hint()),
                Span::styled("done editing   ", style_muted()),
                Span::styled("* required", style_muted()),
            ]
        } else {
            vec![
                Span::styled("[Enter/i] ", style_key_hint()),
                Span::styled("edit form   ", style_muted()),
                Span::styled("* required", style_muted()),
            ]
        };
        if let Some(last) = rows.last() {
            frame.render_widget(Paragraph::new(Line::from(hint)), *last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_core::dictionary::Dictionary;
    use slang_core::favorites::FavoritesRegistry;
    use slang_core::kv::MemoryStore;
    use slang_core::store::DataStore;

    fn state() -> AppState {
        let favorites = FavoritesRegistry::load(Box::new(MemoryStore::new()));
        AppState::new(Dictionary::new(DataStore::fallback(), favorites, 6), true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut SubmitForm, text: &str, s: &AppState) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)), s);
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let s = state();
        let mut form = SubmitForm::new();
        assert!(matches!(
            form.handle_key(key(KeyCode::Enter), &s).as_slice(),
            [Action::BeginEdit]
        ));
        form.on_action(&Action::BeginEdit, &s);

        type_text(&mut form, "Shani", &s);
        form.handle_key(key(KeyCode::Tab), &s);
        type_text(&mut form, "Bemba", &s);

        let draft = form.draft();
        assert_eq!(draft.word, "Shani");
        assert_eq!(draft.language, "Bemba");
        assert_eq!(draft.category, "");
    }

    #[test]
    fn test_ctrl_s_submits_and_acceptance_resets() {
        let s = state();
        let mut form = SubmitForm::new();
        form.on_action(&Action::BeginEdit, &s);
        type_text(&mut form, "Shani", &s);

        let actions = form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &s);
        assert!(matches!(actions.as_slice(), [Action::Submit(d)] if d.word == "Shani"));

        form.on_action(&Action::SubmissionAccepted, &s);
        assert_eq!(form.draft(), SubmissionDraft::default());
        assert!(!form.editing);
    }

    #[test]
    fn test_rejection_focuses_missing_field() {
        let s = state();
        let mut form = SubmitForm::new();
        form.on_action(&Action::SubmissionRejected(SubmissionField::Meaning), &s);
        assert_eq!(form.focus, 3);
        assert_eq!(form.invalid, Some(SubmissionField::Meaning));
    }
}
