//! The dictionary context: data store, favorites, filter and view state.
//!
//! Everything the UI mutates goes through here.  Filter setters refilter
//! immediately and drop the view back to LIMITED.

use rand::Rng;
use tracing::debug;

use crate::entry::{Entry, EntryId};
use crate::favorites::FavoritesRegistry;
use crate::filter::{filter_indices, FavoritesScope, FilterCriteria};
use crate::kv::StoreError;
use crate::pagination::{ViewMode, ViewState};
use crate::store::DataStore;

pub struct Dictionary {
    store: DataStore,
    favorites: FavoritesRegistry,
    criteria: FilterCriteria,
    view: ViewState,
    languages: Vec<String>,
    categories: Vec<String>,
    entry_of_the_day: Option<usize>,
}

impl Dictionary {
    pub fn new(store: DataStore, favorites: FavoritesRegistry, initial_count: usize) -> Self {
        let languages = store.languages();
        let categories = store.categories();
        let mut dict = Self {
            store,
            favorites,
            criteria: FilterCriteria::default(),
            view: ViewState::new(initial_count),
            languages,
            categories,
            entry_of_the_day: None,
        };
        dict.refilter();
        dict
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn favorites(&self) -> &FavoritesRegistry {
        &self.favorites
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Language filter choices, in first-seen order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_favorite(&self, entry: &Entry) -> bool {
        self.favorites.is_favorite(entry)
    }

    // ── filter state ────────────────────────────────────────────────────────

    pub fn set_search(&mut self, term: &str) {
        self.criteria.search = term.to_string();
        self.refilter();
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.criteria.language = language.filter(|l| !l.is_empty());
        self.refilter();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.criteria.category = category.filter(|c| !c.is_empty());
        self.refilter();
    }

    pub fn set_scope(&mut self, scope: FavoritesScope) {
        self.criteria.scope = scope;
        self.refilter();
    }

    /// All → first language → … → last language → All.
    pub fn cycle_language(&mut self) -> Option<&str> {
        let next = next_choice(&self.languages, self.criteria.language.as_deref());
        self.set_language(next);
        self.criteria.language.as_deref()
    }

    pub fn cycle_category(&mut self) -> Option<&str> {
        let next = next_choice(&self.categories, self.criteria.category.as_deref());
        self.set_category(next);
        self.criteria.category.as_deref()
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    fn refilter(&mut self) {
        let indices = filter_indices(self.store.entries(), &self.criteria, &self.favorites);
        debug!(
            "refilter: {} of {} entries match {:?}",
            indices.len(),
            self.store.len(),
            self.criteria
        );
        self.view.set_filtered(indices);
    }

    // ── view state ──────────────────────────────────────────────────────────

    pub fn toggle_view_all(&mut self) -> ViewMode {
        self.view.toggle()
    }

    /// Entries to draw, paired with their store index.
    pub fn visible_entries(&self) -> Vec<(usize, &Entry)> {
        self.view
            .visible()
            .iter()
            .filter_map(|&i| self.store.get(i).map(|e| (i, e)))
            .collect()
    }

    pub fn summary(&self) -> String {
        self.view.summary()
    }

    // ── favorites ───────────────────────────────────────────────────────────

    /// Flip favorite membership for the entry with this identity.
    ///
    /// The filtered sequence is left alone, so un-hearting an entry while
    /// viewing favorites keeps it on screen until the next filter change.
    /// `Ok(None)` when no entry has this identity.
    pub fn toggle_favorite(&mut self, id: &EntryId) -> Result<Option<bool>, StoreError> {
        let Some((_, entry)) = self.store.find_by_id(id) else {
            debug!("toggle_favorite: no entry {}", id);
            return Ok(None);
        };
        let entry = entry.clone();
        self.favorites.toggle(&entry).map(Some)
    }

    // ── entry of the day ────────────────────────────────────────────────────

    /// Pick a new entry of the day.  `None` on an empty store.
    pub fn pick_entry_of_the_day<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Entry> {
        self.entry_of_the_day = self.store.random_index(rng);
        self.entry_of_the_day()
    }

    pub fn entry_of_the_day(&self) -> Option<&Entry> {
        self.entry_of_the_day.and_then(|i| self.store.get(i))
    }

    pub fn entry_of_the_day_index(&self) -> Option<usize> {
        self.entry_of_the_day
    }
}

fn next_choice(choices: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None | Some("") => choices.first().cloned(),
        Some(cur) => choices
            .iter()
            .position(|c| c == cur)
            .and_then(|i| choices.get(i + 1))
            .cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::pagination::INITIAL_DISPLAY_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dictionary() -> Dictionary {
        let favorites = FavoritesRegistry::load(Box::new(MemoryStore::new()));
        Dictionary::new(DataStore::fallback(), favorites, INITIAL_DISPLAY_COUNT)
    }

    fn visible_words(dict: &Dictionary) -> Vec<String> {
        dict.visible_entries()
            .into_iter()
            .map(|(_, e)| e.word.clone())
            .collect()
    }

    #[test]
    fn test_initial_view_is_limited() {
        let dict = dictionary();
        assert_eq!(dict.visible_entries().len(), 6);
        assert_eq!(dict.summary(), "Showing 6 of 10 slangs");
    }

    #[test]
    fn test_filter_change_resets_expanded_view() {
        let mut dict = dictionary();
        assert_eq!(dict.toggle_view_all(), ViewMode::Expanded);
        assert_eq!(dict.summary(), "Showing 10 slangs");

        dict.set_search("a");
        assert_eq!(dict.view().mode(), ViewMode::Limited);
    }

    #[test]
    fn test_search_narrows_view() {
        let mut dict = dictionary();
        dict.set_search("NSIMA");
        assert_eq!(visible_words(&dict), vec!["Nsima"]);
        assert_eq!(dict.summary(), "Showing 1 slang");

        dict.set_search("no such slang");
        assert!(dict.view().is_empty());
        assert_eq!(dict.summary(), "Showing 0 slangs");
    }

    #[test]
    fn test_cycle_language_wraps_to_all() {
        let mut dict = dictionary();
        assert_eq!(dict.cycle_language(), Some("Bemba"));
        assert!(dict
            .visible_entries()
            .iter()
            .all(|(_, e)| e.language == "Bemba"));
        assert_eq!(dict.cycle_language(), Some("Nyanja"));
        assert_eq!(dict.cycle_language(), None);
        assert_eq!(dict.view().total(), 10);
    }

    #[test]
    fn test_cycle_category_and_clear() {
        let mut dict = dictionary();
        dict.cycle_category();
        dict.cycle_category();
        assert_eq!(dict.criteria().category.as_deref(), Some("Greeting"));
        dict.set_language(Some("Bemba".into()));
        assert_eq!(visible_words(&dict), vec!["Mukwai"]);

        dict.clear_filters();
        assert!(dict.criteria().is_empty());
        assert_eq!(dict.view().total(), 10);
    }

    #[test]
    fn test_unknown_language_selection_matches_nothing() {
        let mut dict = dictionary();
        dict.set_language(Some("Tonga".into()));
        assert!(dict.view().is_empty());
        // cycling from an unknown value goes back to all
        assert_eq!(dict.cycle_language(), None);
    }

    #[test]
    fn test_toggle_favorite_does_not_refilter() {
        let mut dict = dictionary();
        let nsima = dict.store().get(5).unwrap().id();
        assert_eq!(dict.toggle_favorite(&nsima).unwrap(), Some(true));

        dict.set_scope(FavoritesScope::Favorites);
        assert_eq!(visible_words(&dict), vec!["Nsima"]);

        assert_eq!(dict.toggle_favorite(&nsima).unwrap(), Some(false));
        assert_eq!(visible_words(&dict), vec!["Nsima"]);

        dict.set_scope(FavoritesScope::Favorites);
        assert!(dict.view().is_empty());
    }

    #[test]
    fn test_toggle_favorite_unknown_id() {
        let mut dict = dictionary();
        let id = EntryId {
            word: "Ghost".into(),
            language: "Bemba".into(),
            category: "Fun".into(),
        };
        assert_eq!(dict.toggle_favorite(&id).unwrap(), None);
        assert!(dict.favorites().is_empty());
    }

    #[test]
    fn test_entry_of_the_day() {
        let mut dict = dictionary();
        assert!(dict.entry_of_the_day().is_none());
        let mut rng = StdRng::seed_from_u64(42);
        let picked = dict.pick_entry_of_the_day(&mut rng).cloned().unwrap();
        assert_eq!(dict.entry_of_the_day(), Some(&picked));

        let favorites = FavoritesRegistry::load(Box::new(MemoryStore::new()));
        let mut empty = Dictionary::new(DataStore::new(Vec::new()), favorites, 6);
        assert!(empty.pick_entry_of_the_day(&mut rng).is_none());
        assert!(empty.visible_entries().is_empty());
    }
}
