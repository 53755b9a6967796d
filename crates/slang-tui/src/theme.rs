//! Color palette and style constants for the slang dictionary TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 20, 16);
pub const C_GREEN: Color = Color::Rgb(25, 138, 0); // flag green, primary accent
pub const C_ORANGE: Color = Color::Rgb(239, 125, 0); // flag orange, highlights
pub const C_RED: Color = Color::Rgb(222, 32, 16);
pub const C_PRIMARY: Color = Color::Rgb(220, 222, 214);
pub const C_SECONDARY: Color = Color::Rgb(140, 146, 132);
pub const C_MUTED: Color = Color::Rgb(80, 86, 76);
pub const C_SEPARATOR: Color = Color::Rgb(44, 50, 42);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 40, 28);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 50, 42);
pub const C_PANEL_BORDER_FOCUSED: Color = C_GREEN;
pub const C_FILTER_BG: Color = Color::Rgb(22, 28, 22);
pub const C_FILTER_FG: Color = C_ORANGE;
pub const C_LANGUAGE: Color = Color::Rgb(90, 170, 220);
pub const C_CATEGORY: Color = Color::Rgb(180, 140, 220);
pub const C_FAVORITE: Color = C_RED;
pub const C_PLAYING: Color = Color::Rgb(90, 210, 110);
pub const C_TOAST_INFO: Color = Color::Rgb(90, 170, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(90, 210, 110);
pub const C_TOAST_WARNING: Color = C_ORANGE;
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 80);
pub const C_MODE_NORMAL: Color = C_SECONDARY;
pub const C_MODE_SEARCH: Color = C_ORANGE;
pub const C_MODE_FORM: Color = C_GREEN;

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_word() -> Style {
    Style::default().fg(C_ORANGE).add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_key_hint() -> Style {
    Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD)
}
