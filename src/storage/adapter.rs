//! Typed persistence adapter over the opaque key-value store.
//!
//! This module owns the encode/decode boundary between the engine's domain
//! types and the string-keyed durable medium. The favorites collection lives
//! under [`FAVORITES_KEY`] as a JSON array; the theme flag lives under
//! [`THEME_KEY`] as a literal string and is passed through raw since it needs
//! no serialization.
//!
//! Load-time failures degrade rather than propagate: a missing or corrupt
//! value yields the default (empty collection) with a warning, because the
//! engine must come up even when the stored data is damaged. Save-time
//! failures do propagate so callers can surface them; see the favorites
//! store for the non-fatal handling policy.

use crate::domain::error::{Result, ShelfmarkError};
use crate::domain::FavoriteBook;
use crate::storage::backend::KeyValueStore;

/// Store key holding the serialized favorites collection.
pub const FAVORITES_KEY: &str = "favorites";

/// Store key holding the theme flag (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";

/// Encode/decode layer between domain types and a [`KeyValueStore`].
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter").finish_non_exhaustive()
    }
}

impl PersistenceAdapter {
    /// Wraps a key-value store.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the favorites collection.
    ///
    /// Returns an empty collection when the key is absent, the store is
    /// unreadable, or the stored JSON does not parse. The degradation is
    /// logged; it is never an error.
    #[must_use]
    pub fn load_collection(&self) -> Vec<FavoriteBook> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<FavoriteBook>>(&raw) {
            Ok(favorites) => {
                tracing::debug!(count = favorites.len(), "favorites loaded");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored favorites are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Persists the entire favorites collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the durable write fails.
    pub fn save_collection(&mut self, favorites: &[FavoriteBook]) -> Result<()> {
        let _span = tracing::debug_span!("save_collection", count = favorites.len()).entered();

        let json = serde_json::to_string(favorites)
            .map_err(|e| ShelfmarkError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, &json)?;

        tracing::debug!("favorites persisted");
        Ok(())
    }

    /// Loads the raw string stored under `key`, or `None` if absent or unreadable.
    #[must_use]
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read key");
                None
            }
        }
    }

    /// Stores a raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    pub fn save_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogEntry;
    use crate::storage::memory::MemoryStore;
    use chrono::Utc;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            published_date: None,
            image_url: None,
            categories: vec!["Science Fiction".to_string()],
            page_count: 412,
            average_rating: 4.2,
        }
    }

    #[test]
    fn collection_round_trips_field_for_field() {
        let mut adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        let favorites = vec![
            FavoriteBook::from_entry(entry("a"), Utc::now()),
            FavoriteBook::from_entry(entry("b"), Utc::now()),
        ];

        adapter.save_collection(&favorites).unwrap();
        assert_eq!(adapter.load_collection(), favorites);
    }

    #[test]
    fn missing_collection_loads_empty() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        assert!(adapter.load_collection().is_empty());
    }

    #[test]
    fn corrupt_collection_loads_empty() {
        let store = MemoryStore::with_entries([(
            FAVORITES_KEY.to_string(),
            "{ definitely not an array".to_string(),
        )]);
        let adapter = PersistenceAdapter::new(Box::new(store));
        assert!(adapter.load_collection().is_empty());
    }

    #[test]
    fn raw_keys_pass_through() {
        let mut adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        assert_eq!(adapter.load_raw(THEME_KEY), None);
        adapter.save_raw(THEME_KEY, "dark").unwrap();
        assert_eq!(adapter.load_raw(THEME_KEY).as_deref(), Some("dark"));
    }
}
