//! Pagination of the filtered view: a short list first, everything on demand.
//!
//! ```text
//!   LIMITED ──toggle──▶ EXPANDED
//!      ▲                   │
//!      └──toggle / filter──┘
//! ```

/// Entries shown before the user asks for the full list.
pub const INITIAL_DISPLAY_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Limited,
    Expanded,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Limited => Self::Expanded,
            Self::Expanded => Self::Limited,
        }
    }
}

/// Filtered indices plus the LIMITED/EXPANDED flag.
#[derive(Debug, Clone)]
pub struct ViewState {
    filtered: Vec<usize>,
    mode: ViewMode,
    limit: usize,
}

impl ViewState {
    pub fn new(limit: usize) -> Self {
        Self {
            filtered: Vec::new(),
            mode: ViewMode::Limited,
            limit: limit.max(1),
        }
    }

    /// Replace the filtered sequence.  Always drops back to LIMITED.
    pub fn set_filtered(&mut self, filtered: Vec<usize>) {
        self.filtered = filtered;
        self.mode = ViewMode::Limited;
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.mode = self.mode.toggle();
        self.mode
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Indices to draw right now.
    pub fn visible(&self) -> &[usize] {
        match self.mode {
            ViewMode::Expanded => &self.filtered,
            ViewMode::Limited => &self.filtered[..self.filtered.len().min(self.limit)],
        }
    }

    /// Whether there's anything hidden by LIMITED, i.e. whether the
    /// "view all" control means anything.
    pub fn has_more(&self) -> bool {
        self.filtered.len() > self.limit
    }

    pub fn summary(&self) -> String {
        let total = self.total();
        let shown = self.visible().len();
        if self.mode == ViewMode::Expanded || total <= self.limit {
            let plural = if total == 1 { "" } else { "s" };
            format!("Showing {} slang{}", total, plural)
        } else {
            format!("Showing {} of {} slangs", shown, total)
        }
    }

    /// Label for the view-all control in the current state.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            ViewMode::Limited => "View all slangs",
            ViewMode::Expanded => "Show fewer",
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(INITIAL_DISPLAY_COUNT)
    }
}
