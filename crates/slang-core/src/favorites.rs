//! Favorites registry — entries the user hearted, persisted in one slot.

use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::kv::{KeyValueStore, StoreError};

/// Slot name the registry is persisted under.
pub const FAVORITES_KEY: &str = "favorites";

pub struct FavoritesRegistry {
    entries: Vec<Entry>,
    store: Box<dyn KeyValueStore>,
}

impl FavoritesRegistry {
    /// Load from `store`.  A missing slot, an unreadable store or a corrupt
    /// payload all yield an empty registry.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match Self::from_json(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("favorites slot is corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read favorites, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("loaded {} favorites", entries.len());
        Self { entries, store }
    }

    pub fn is_favorite(&self, entry: &Entry) -> bool {
        self.entries.iter().any(|f| f.same_identity(entry))
    }

    /// Flip membership of `entry`'s identity and persist the whole registry.
    /// Returns the new favorited state.
    ///
    /// A failed write leaves the in-memory registry toggled and reports the
    /// error; the next successful write brings storage back in sync.
    pub fn toggle(&mut self, entry: &Entry) -> Result<bool, StoreError> {
        let now_favorite = match self.entries.iter().position(|f| f.same_identity(entry)) {
            Some(pos) => {
                self.entries.remove(pos);
                false
            }
            None => {
                self.entries.push(entry.clone());
                true
            }
        };
        debug!(
            "favorite {} -> {}",
            entry.id(),
            if now_favorite { "on" } else { "off" }
        );
        self.persist()?;
        Ok(now_favorite)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Parse a persisted payload, dropping later duplicates of an identity.
    pub fn from_json(raw: &str) -> Result<Vec<Entry>, serde_json::Error> {
        let parsed: Vec<Entry> = serde_json::from_str(raw)?;
        let mut entries: Vec<Entry> = Vec::with_capacity(parsed.len());
        for entry in parsed {
            if !entries.iter().any(|e| e.same_identity(&entry)) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = self.to_json()?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::fallback_entries;
    use crate::kv::MemoryStore;

    fn registry() -> (FavoritesRegistry, MemoryStore) {
        let store = MemoryStore::new();
        (FavoritesRegistry::load(Box::new(store.clone())), store)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (mut reg, _) = registry();
        let e = &fallback_entries()[0];
        assert!(!reg.is_favorite(e));
        assert!(reg.toggle(e).unwrap());
        assert!(reg.is_favorite(e));
        assert!(!reg.toggle(e).unwrap());
        assert!(!reg.is_favorite(e));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_same_identity_shares_membership() {
        let (mut reg, _) = registry();
        let a = fallback_entries()[5].clone();
        let b = Entry {
            meaning: "a different gloss".into(),
            example_native: String::new(),
            ..a.clone()
        };
        reg.toggle(&a).unwrap();
        assert!(reg.is_favorite(&b));
        reg.toggle(&b).unwrap();
        assert!(!reg.is_favorite(&a));
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_every_toggle_persists_whole_registry() {
        let (mut reg, store) = registry();
        let entries = fallback_entries();
        reg.toggle(&entries[0]).unwrap();
        reg.toggle(&entries[1]).unwrap();
        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        let saved: Vec<Entry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, vec![entries[0].clone(), entries[1].clone()]);

        reg.toggle(&entries[0]).unwrap();
        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        let saved: Vec<Entry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, vec![entries[1].clone()]);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let store = MemoryStore::with_slot(FAVORITES_KEY, "{not json");
        let reg = FavoritesRegistry::load(Box::new(store));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_identities() {
        let e = fallback_entries()[2].clone();
        let dup = Entry {
            meaning: "dup".into(),
            ..e.clone()
        };
        let raw = serde_json::to_string(&vec![e.clone(), dup]).unwrap();
        let reg = FavoritesRegistry::load(Box::new(MemoryStore::with_slot(FAVORITES_KEY, &raw)));
        assert_eq!(reg.entries(), &[e]);
    }

    #[test]
    fn test_write_failure_keeps_memory_consistent() {
        let mut reg = FavoritesRegistry::load(Box::new(MemoryStore::read_only()));
        let e = &fallback_entries()[3];
        assert!(reg.toggle(e).is_err());
        assert!(reg.is_favorite(e));
        assert_eq!(reg.len(), 1);
    }
}
