//! Status bar — bottom line with input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Page;
use crate::theme::{C_MODE_FORM, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Form => "EDIT",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Form => C_MODE_FORM,
        }
    }
}

fn keys_for(mode: InputMode, page: Page) -> &'static str {
    match mode {
        InputMode::Search => "type to search  Enter keep  Esc clear/close",
        InputMode::Form => "type to edit  Tab/↑↓ field  Enter next  Ctrl+S submit  Esc done",
        InputMode::Normal => match page {
            Page::Home => "p play  f favorite  r another  y copy  s stop  Tab pages  ? help  q quit",
            Page::Dictionary => {
                "↑↓/jk select  / search  l lang  c category  F favorites  x clear  v view all  Enter play  f fav  ? help"
            }
            Page::Submit => "Enter/i edit form  Tab pages  ? help  q quit",
        },
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, page: Page) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(keys_for(mode, page), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
