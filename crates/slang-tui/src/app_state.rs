//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use slang_core::dictionary::Dictionary;
use slang_core::entry::Entry;
use slang_core::store::DataOrigin;

use crate::action::{AudioControl, Page};
use crate::widgets::status_bar::InputMode;

pub const LABEL_PLAY: &str = "🔊 Play Audio";
pub const LABEL_PLAYING: &str = "🔊 Playing...";

pub struct AppState {
    // ── Data ────────────────────────────────────────────────────────────────
    pub dictionary: Dictionary,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub page: Page,
    pub input_mode: InputMode,
    pub show_help: bool,

    // ── Audio ───────────────────────────────────────────────────────────────
    /// Mirror of the audio controller's active control, refreshed by the App
    /// after every play/stop/event.
    pub playing: Option<AudioControl>,
    /// False when no player binary was found; play controls still work but
    /// report "Audio not supported on this system."
    pub audio_available: bool,
}

impl AppState {
    pub fn new(dictionary: Dictionary, audio_available: bool) -> Self {
        Self {
            dictionary,
            page: Page::Home,
            input_mode: InputMode::Normal,
            show_help: false,
            playing: None,
            audio_available,
        }
    }

    pub fn audio_label(&self, control: &AudioControl) -> &'static str {
        if self.playing.as_ref() == Some(control) {
            LABEL_PLAYING
        } else {
            LABEL_PLAY
        }
    }

    pub fn is_favorite(&self, entry: &Entry) -> bool {
        self.dictionary.is_favorite(entry)
    }

    pub fn offline(&self) -> bool {
        self.dictionary.store().origin() == DataOrigin::Fallback
    }
}
