//! Filter/search engine — computes the filtered view of the collection.

use crate::entry::Entry;
use crate::favorites::FavoritesRegistry;

/// Which entries the favorites selector admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesScope {
    #[default]
    All,
    Favorites,
}

impl FavoritesScope {
    pub fn toggle(self) -> Self {
        match self {
            Self::All => Self::Favorites,
            Self::Favorites => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all slangs",
            Self::Favorites => "favorites",
        }
    }
}

/// Transient search/filter state.  `None` filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub language: Option<String>,
    pub category: Option<String>,
    pub scope: FavoritesScope,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && equality_unset(&self.language)
            && equality_unset(&self.category)
            && self.scope == FavoritesScope::All
    }

    pub fn matches(&self, entry: &Entry, favorites: &FavoritesRegistry) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_lowered(entry, &needle, favorites)
    }

    fn matches_lowered(&self, entry: &Entry, needle: &str, favorites: &FavoritesRegistry) -> bool {
        let matches_search = needle.is_empty()
            || entry.word.to_lowercase().contains(needle)
            || entry.meaning.to_lowercase().contains(needle)
            || entry.example_native.to_lowercase().contains(needle);

        let matches_language = equality_matches(&self.language, &entry.language);
        let matches_category = equality_matches(&self.category, &entry.category);

        let matches_favorites = match self.scope {
            FavoritesScope::All => true,
            FavoritesScope::Favorites => favorites.is_favorite(entry),
        };

        matches_search && matches_language && matches_category && matches_favorites
    }
}

fn equality_unset(filter: &Option<String>) -> bool {
    filter.as_deref().map_or(true, str::is_empty)
}

fn equality_matches(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref() {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

/// Indices of matching entries, in source order.
pub fn filter_indices(
    entries: &[Entry],
    criteria: &FilterCriteria,
    favorites: &FavoritesRegistry,
) -> Vec<usize> {
    let needle = criteria.search.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| criteria.matches_lowered(e, &needle, favorites))
        .map(|(i, _)| i)
        .collect()
}

/// Matching entries, in source order.
pub fn filter(
    entries: &[Entry],
    criteria: &FilterCriteria,
    favorites: &FavoritesRegistry,
) -> Vec<Entry> {
    filter_indices(entries, criteria, favorites)
        .into_iter()
        .map(|i| entries[i].clone())
        .collect()
}

/// Normalize an incoming language parameter: `bemba` → `Bemba`.
/// Only the first character changes case.
pub fn normalize_language_param(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::fallback_entries;
    use crate::kv::MemoryStore;

    fn empty_favorites() -> FavoritesRegistry {
        FavoritesRegistry::load(Box::new(MemoryStore::new()))
    }

    fn words(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let entries = fallback_entries();
        let out = filter(&entries, &FilterCriteria::default(), &empty_favorites());
        assert_eq!(out, entries);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = fallback_entries();
        let criteria = FilterCriteria {
            search: "NSIMA".into(),
            ..Default::default()
        };
        let out = filter(&entries, &criteria, &empty_favorites());
        assert_eq!(words(&out), vec!["Nsima"]);
    }

    #[test]
    fn test_search_covers_meaning_and_native_example_only() {
        let entries = fallback_entries();
        let favs = empty_favorites();

        let by_meaning = FilterCriteria {
            search: "maize".into(),
            ..Default::default()
        };
        assert_eq!(
            words(&filter(&entries, &by_meaning, &favs)),
            vec!["Chibuku", "Nsima"]
        );

        let by_native = FilterCriteria {
            search: "facebook".into(),
            ..Default::default()
        };
        assert_eq!(
            words(&filter(&entries, &by_native, &favs)),
            vec!["Kwati ni movie"]
        );

        // "relish" only appears in the translation of Nsima
        let by_translation = FilterCriteria {
            search: "relish".into(),
            ..Default::default()
        };
        assert!(filter(&entries, &by_translation, &favs).is_empty());
    }

    #[test]
    fn test_language_and_category_are_anded() {
        let entries = fallback_entries();
        let criteria = FilterCriteria {
            language: Some("Nyanja".into()),
            category: Some("Food".into()),
            ..Default::default()
        };
        let out = filter(&entries, &criteria, &empty_favorites());
        assert_eq!(words(&out), vec!["Chibuku", "Nsima"]);

        let exact = FilterCriteria {
            language: Some("nyanja".into()),
            ..Default::default()
        };
        assert!(filter(&entries, &exact, &empty_favorites()).is_empty());
    }

    #[test]
    fn test_empty_string_filters_match_everything() {
        let entries = fallback_entries();
        let criteria = FilterCriteria {
            language: Some(String::new()),
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(filter(&entries, &criteria, &empty_favorites()).len(), 10);
    }

    #[test]
    fn test_favorites_scope() {
        let entries = fallback_entries();
        let mut favs = empty_favorites();
        favs.toggle(&entries[8]).unwrap();
        favs.toggle(&entries[2]).unwrap();
        let criteria = FilterCriteria {
            scope: FavoritesScope::Favorites,
            ..Default::default()
        };
        // source order, not favoriting order
        assert_eq!(filter_indices(&entries, &criteria, &favs), vec![2, 8]);
    }

    #[test]
    fn test_empty_collection() {
        let criteria = FilterCriteria {
            search: "anything".into(),
            ..Default::default()
        };
        assert!(filter(&[], &criteria, &empty_favorites()).is_empty());
        assert!(filter_indices(&[], &FilterCriteria::default(), &empty_favorites()).is_empty());
    }

    #[test]
    fn test_normalize_language_param() {
        assert_eq!(normalize_language_param("bemba"), "Bemba");
        assert_eq!(normalize_language_param("nYANJA"), "NYANJA");
        assert_eq!(normalize_language_param(""), "");
    }

    #[test]
    fn test_scope_toggle() {
        assert_eq!(FavoritesScope::All.toggle(), FavoritesScope::Favorites);
        assert_eq!(FavoritesScope::Favorites.toggle(), FavoritesScope::All);
    }
}
