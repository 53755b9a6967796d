//! HelpOverlay component — centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BG, C_MUTED, C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    /// Any key closes the overlay.
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('q') => vec![Action::ToggleHelp, Action::Quit],
            _ => vec![Action::ToggleHelp],
        }
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !state.show_help {
            return;
        }

        let popup = centered_rect(64, 30, area);
        let mut lines = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" pages"),
            help_row("1 / 2 / 3", "home / dictionary / submit"),
            help_row("tab / shift-tab", "next / previous page"),
            Line::from(""),
            section(" slangs"),
            help_row("p  or  enter", "play audio (stops anything playing)"),
            help_row("s", "stop audio"),
            help_row("f", "add / remove favorite"),
            help_row("y", "copy word and meaning"),
            help_row("r", "another slang of the day (home)"),
            Line::from(""),
            section(" dictionary"),
            help_row("↑ / ↓  or  j / k", "move selection"),
            help_row("/", "search (esc clears, then closes)"),
            help_row("l / c", "cycle language / category"),
            help_row("F", "all slangs ↔ favorites only"),
            help_row("x", "clear search and filters"),
            help_row("v", "view all / show fewer"),
            Line::from(""),
            section(" submit"),
            help_row("enter  or  i", "edit form"),
            help_row("ctrl+s", "send submission"),
            Line::from(""),
            help_row("?", "toggle this help"),
            help_row("q / ctrl+c", "quit"),
        ];
        if !state.audio_available {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " mpv not found: audio playback is unavailable",
                Style::default().fg(C_MUTED),
            )));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                        .style(Style::default().bg(C_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<18}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
