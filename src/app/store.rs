//! Favorites store: the authoritative owned collection.
//!
//! The store is the single writer of the favorites collection. It enforces id
//! uniqueness at insertion, owns default field initialization for new
//! favorites, and writes the entire collection back through the persistence
//! adapter synchronously after every mutation (no batching, no debounce on
//! writes), so a crash immediately after a mutating call returns never loses
//! that mutation.
//!
//! # Persistence failure policy
//!
//! A failed durable write after a successful in-memory mutation is returned to
//! the caller but the mutation is kept: the in-memory collection stays
//! authoritative for the session, and the caller surfaces the failure as a
//! dismissible warning. Losing the user's working state over a storage fault
//! is not acceptable.

use crate::app::modes::Theme;
use crate::domain::error::Result;
use crate::domain::{CatalogEntry, FavoriteBook, ReadingStatus};
use crate::storage::{PersistenceAdapter, THEME_KEY};
use chrono::Utc;

/// Highest allowed personal rating.
const MAX_RATING: u8 = 5;

/// Outcome of an [`FavoritesStore::add`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was appended to the collection.
    Added,

    /// A favorite with the same id already exists; nothing changed.
    Duplicate,
}

/// Authoritative mutable collection of favorite books.
#[derive(Debug)]
pub struct FavoritesStore {
    favorites: Vec<FavoriteBook>,
    adapter: PersistenceAdapter,
}

impl FavoritesStore {
    /// Creates the store, loading the persisted collection.
    ///
    /// Missing or corrupt stored data yields an empty collection; see
    /// [`PersistenceAdapter::load_collection`].
    #[must_use]
    pub fn new(adapter: PersistenceAdapter) -> Self {
        let favorites = adapter.load_collection();
        Self { favorites, adapter }
    }

    /// Read access to the collection in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[FavoriteBook] {
        &self.favorites
    }

    /// Whether a favorite with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|book| book.id() == id)
    }

    /// Adds a catalog entry as a new favorite.
    ///
    /// Duplicate ids are rejected without mutating anything; this is the sole
    /// insertion path and there is no merge-on-duplicate. On insertion the new
    /// favorite gets the default annotations and `date_added = now`, and the
    /// collection is persisted.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails; the in-memory
    /// insertion is kept regardless (see module docs).
    pub fn add(&mut self, entry: CatalogEntry) -> Result<AddOutcome> {
        let _span = tracing::debug_span!("add_favorite", id = %entry.id).entered();

        if self.contains(&entry.id) {
            tracing::debug!("duplicate id, rejecting add");
            return Ok(AddOutcome::Duplicate);
        }

        self.favorites
            .push(FavoriteBook::from_entry(entry, Utc::now()));
        self.persist()?;

        tracing::debug!(collection_size = self.favorites.len(), "favorite added");
        Ok(AddOutcome::Added)
    }

    /// Removes the favorite with the given id.
    ///
    /// Idempotent: removing an absent id is a no-op, not an error, and skips
    /// the durable write since nothing changed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("remove_favorite", id = %id).entered();

        let before = self.favorites.len();
        self.favorites.retain(|book| book.id() != id);

        if self.favorites.len() == before {
            tracing::debug!("id not present, nothing to remove");
            return Ok(());
        }

        self.persist()?;
        tracing::debug!(collection_size = self.favorites.len(), "favorite removed");
        Ok(())
    }

    /// Sets the personal rating of a favorite, clamped to 0–5.
    ///
    /// No-op when the id is absent; the store tolerates stale ids.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails.
    pub fn set_rating(&mut self, id: &str, rating: u8) -> Result<()> {
        self.update(id, "set_rating", |book| {
            book.personal_rating = rating.min(MAX_RATING);
        })
    }

    /// Sets the reading status of a favorite.
    ///
    /// No-op when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails.
    pub fn set_status(&mut self, id: &str, status: ReadingStatus) -> Result<()> {
        self.update(id, "set_status", |book| {
            book.reading_status = status;
        })
    }

    /// Replaces the notes of a favorite.
    ///
    /// No-op when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails.
    pub fn set_notes(&mut self, id: &str, notes: String) -> Result<()> {
        self.update(id, "set_notes", |book| {
            book.notes = notes;
        })
    }

    /// Persists the theme flag through the same durable medium.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable write fails.
    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.adapter.save_raw(THEME_KEY, theme.as_str())
    }

    /// Looks up a favorite by id, applies `mutate` to it, and persists.
    fn update(
        &mut self,
        id: &str,
        operation: &str,
        mutate: impl FnOnce(&mut FavoriteBook),
    ) -> Result<()> {
        let _span = tracing::debug_span!("update_favorite", operation = operation, id = %id).entered();

        let Some(book) = self.favorites.iter_mut().find(|book| book.id() == id) else {
            tracing::debug!("id not present, ignoring update");
            return Ok(());
        };

        mutate(book);
        self.persist()?;

        tracing::debug!("favorite updated");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.adapter.save_collection(&self.favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ShelfmarkError;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Author".to_string()],
            published_date: None,
            image_url: None,
            categories: vec!["Uncategorized".to_string()],
            page_count: 100,
            average_rating: 3.0,
        }
    }

    fn memory_store() -> FavoritesStore {
        FavoritesStore::new(PersistenceAdapter::new(Box::new(MemoryStore::new())))
    }

    /// Store whose reads work but whose writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> crate::domain::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> crate::domain::Result<()> {
            Err(ShelfmarkError::Storage("disk full".to_string()))
        }
    }

    #[test]
    fn add_initializes_annotation_defaults() {
        let mut store = memory_store();
        let before = Utc::now();

        assert_eq!(store.add(entry("a", "Dune")).unwrap(), AddOutcome::Added);

        let book = &store.favorites()[0];
        assert_eq!(book.personal_rating, 0);
        assert_eq!(book.reading_status, ReadingStatus::WantToRead);
        assert_eq!(book.notes, "");
        assert!(book.date_added >= before);
    }

    #[test]
    fn duplicate_add_leaves_collection_unchanged() {
        let mut store = memory_store();
        store.add(entry("a", "Dune")).unwrap();
        store.set_rating("a", 4).unwrap();
        let snapshot = store.favorites().to_vec();

        assert_eq!(
            store.add(entry("a", "Dune (other edition)")).unwrap(),
            AddOutcome::Duplicate
        );
        assert_eq!(store.favorites(), snapshot.as_slice());
    }

    #[test]
    fn ids_stay_unique_across_many_adds() {
        let mut store = memory_store();
        for id in ["a", "b", "a", "c", "b", "a"] {
            store.add(entry(id, id)).unwrap();
        }

        let mut ids: Vec<&str> = store.favorites().iter().map(FavoriteBook::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = memory_store();
        store.add(entry("a", "Dune")).unwrap();
        store.add(entry("b", "Hobbit")).unwrap();

        store.remove("a").unwrap();
        let after_first = store.favorites().to_vec();

        store.remove("a").unwrap();
        assert_eq!(store.favorites(), after_first.as_slice());
    }

    #[test]
    fn updates_mutate_single_field_and_tolerate_stale_ids() {
        let mut store = memory_store();
        store.add(entry("a", "Dune")).unwrap();

        store.set_rating("a", 9).unwrap();
        store.set_status("a", ReadingStatus::Finished).unwrap();
        store.set_notes("a", "A classic.".to_string()).unwrap();

        let book = &store.favorites()[0];
        assert_eq!(book.personal_rating, 5); // clamped
        assert_eq!(book.reading_status, ReadingStatus::Finished);
        assert_eq!(book.notes, "A classic.");

        // Stale ids are tolerated silently.
        store.set_rating("ghost", 3).unwrap();
        store.set_notes("ghost", "x".to_string()).unwrap();
        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn collection_survives_reload_through_adapter() {
        let mut backing = MemoryStore::new();
        {
            let mut store = FavoritesStore::new(PersistenceAdapter::new(Box::new(
                MemoryStore::with_entries([]),
            )));
            store.add(entry("a", "Dune")).unwrap();
            store.set_notes("a", "sand".to_string()).unwrap();
            // Copy the persisted payload into the outer backing store.
            let payload = serde_json::to_string(store.favorites()).unwrap();
            backing.set(crate::storage::FAVORITES_KEY, &payload).unwrap();
        }

        let reloaded = FavoritesStore::new(PersistenceAdapter::new(Box::new(backing)));
        assert_eq!(reloaded.favorites().len(), 1);
        assert_eq!(reloaded.favorites()[0].notes, "sand");
    }

    #[test]
    fn failed_write_keeps_in_memory_mutation() {
        let mut store = FavoritesStore::new(PersistenceAdapter::new(Box::new(BrokenStore)));

        let result = store.add(entry("a", "Dune"));
        assert!(result.is_err());
        // The collection stays authoritative for the session.
        assert_eq!(store.favorites().len(), 1);
    }
}
