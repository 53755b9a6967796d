//! Action enum — all user-initiated intents and internal events.

use slang_core::entry::EntryId;
use slang_core::submission::{SubmissionDraft, SubmissionField};

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    EntryOfDay,
    SlangList,
    SubmitForm,
    HelpOverlay,
}

/// Top-level pages, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Dictionary,
    Submit,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Dictionary, Page::Submit];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Dictionary => "Dictionary",
            Self::Submit => "Submit",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Dictionary,
            Self::Dictionary => Self::Submit,
            Self::Submit => Self::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Home => Self::Submit,
            Self::Dictionary => Self::Home,
            Self::Submit => Self::Dictionary,
        }
    }
}

/// Which on-screen play control asked for audio.  The slang-of-the-day card
/// and a dictionary card showing the same entry are different controls, and
/// each card is keyed by its store index so duplicates stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioControl {
    EntryOfDay,
    Card(usize),
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    GoTo(Page),
    NextPage,
    PrevPage,
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,

    // ── Search / filters ─────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchChanged(String),
    CycleLanguage,
    CycleCategory,
    ToggleScope,
    ClearFilters,
    ToggleViewAll,

    // ── Entries ──────────────────────────────────────────────────────────────
    ToggleFavorite(EntryId),
    /// Play the clip of the entry at this store index.
    PlayAudio(usize, AudioControl),
    StopAudio,
    RerollEntryOfDay,
    CopyToClipboard(String),

    // ── Submit form ──────────────────────────────────────────────────────────
    BeginEdit,
    EndEdit,
    Submit(SubmissionDraft),
    SubmissionAccepted,
    SubmissionRejected(SubmissionField),

    // ── System ───────────────────────────────────────────────────────────────
    ToggleHelp,
    Quit,
    Resize(u16, u16),
}
