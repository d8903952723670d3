//! Application state container.
//!
//! [`AppState`] is the single source of truth handed to the rendering layer:
//! the favorites store, the current search session, the display modes, the
//! theme flag, and the validation-error map. It is mutated only by the event
//! handler in response to dispatched events, preserving single-writer
//! discipline without process-wide globals.

use crate::app::modes::{SortKey, StatusFilter, Theme};
use crate::app::projection::project;
use crate::app::session::SearchSession;
use crate::app::store::FavoritesStore;
use crate::domain::FavoriteBook;
use std::collections::BTreeMap;

/// Validation-error category for a rejected duplicate add.
pub const ERROR_DUPLICATE: &str = "duplicate";

/// Validation-error category for a failed durable write.
pub const ERROR_PERSISTENCE: &str = "persistence";

/// Transient user-facing error messages keyed by category.
///
/// Cleared only by explicit request, never by a timer.
pub type ValidationErrors = BTreeMap<String, String>;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Authoritative favorites collection and its persistence.
    pub store: FavoritesStore,

    /// Current catalog search lifecycle.
    pub session: SearchSession,

    /// Sort key for the projected favorites view.
    pub sort_key: SortKey,

    /// Filter key for the projected favorites view.
    pub status_filter: StatusFilter,

    /// Color scheme flag.
    pub theme: Theme,

    /// Dismissible user-facing error messages.
    pub validation_errors: ValidationErrors,
}

impl AppState {
    /// Creates the state around a loaded store and theme.
    #[must_use]
    pub fn new(store: FavoritesStore, theme: Theme) -> Self {
        Self {
            store,
            session: SearchSession::new(),
            sort_key: SortKey::default(),
            status_filter: StatusFilter::default(),
            theme,
            validation_errors: ValidationErrors::new(),
        }
    }

    /// Computes the display list for the current sort and filter modes.
    ///
    /// Pure read; recomputed on every call.
    #[must_use]
    pub fn shelf(&self) -> Vec<FavoriteBook> {
        project(self.store.favorites(), self.sort_key, self.status_filter)
    }

    /// Whether a catalog entry is already in favorites.
    ///
    /// Used by the rendering layer to mark search results as added.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// Records a validation error under the given category.
    pub fn set_validation_error(&mut self, category: &str, message: impl Into<String>) {
        self.validation_errors
            .insert(category.to_string(), message.into());
    }
}
