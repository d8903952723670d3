//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! search completions, translating them into state changes and follow-up
//! actions. Every exposed operation of the engine is an [`Event`] variant;
//! the driver dispatches events one at a time and each runs to completion, so
//! mutations apply in dispatch order and are never interleaved.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the driver (user input, debouncer output, completed
//!    searches)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via store and session methods
//! 4. Actions are collected and returned for execution
//!
//! Persistence failures inside store operations are downgraded here: the
//! in-memory mutation is kept and the failure surfaces as a dismissible
//! validation error rather than propagating (see the favorites store module
//! docs for the policy).

use crate::app::actions::Action;
use crate::app::modes::{SortKey, StatusFilter};
use crate::app::session::MIN_QUERY_LEN;
use crate::app::state::{AppState, ERROR_DUPLICATE, ERROR_PERSISTENCE};
use crate::app::store::AddOutcome;
use crate::domain::error::Result;
use crate::domain::{CatalogEntry, ReadingStatus};

/// Events triggered by user input, the debouncer, or completed searches.
///
/// The variants map one-to-one onto the operations exposed to the rendering
/// layer. Each event represents a discrete occurrence processed sequentially
/// by [`handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The live query text changed (typically per keystroke).
    ///
    /// Only records the text; searching waits for the debounced
    /// [`Event::EffectiveQuery`].
    QueryChanged(String),

    /// The debouncer settled on an effective query.
    ///
    /// Queries shorter than two characters after trimming force the session
    /// to idle immediately instead of triggering a request.
    EffectiveQuery(String),

    /// A catalog request finished.
    ///
    /// Applied only when `generation` still matches the session's current
    /// generation; stale completions are discarded.
    SearchCompleted {
        /// Generation the request was issued under.
        generation: u64,
        /// Entries on success, user-facing message on failure.
        result: std::result::Result<Vec<CatalogEntry>, String>,
    },

    /// Clears the query, results, and any search error.
    ClearSearch,

    /// Adds a search result to favorites.
    AddFavorite(CatalogEntry),

    /// Removes a favorite by id. Idempotent.
    RemoveFavorite(String),

    /// Sets the personal rating (0–5) of a favorite.
    SetRating {
        /// Favorite id.
        id: String,
        /// New rating; clamped to 0–5 by the store.
        rating: u8,
    },

    /// Sets the reading status of a favorite.
    SetStatus {
        /// Favorite id.
        id: String,
        /// New reading status.
        status: ReadingStatus,
    },

    /// Replaces the notes of a favorite.
    SetNotes {
        /// Favorite id.
        id: String,
        /// New note text.
        notes: String,
    },

    /// Changes the sort key of the projected view.
    SetSort(SortKey),

    /// Changes the status filter of the projected view.
    SetFilter(StatusFilter),

    /// Flips the theme flag and persists it.
    ToggleTheme,

    /// Dismisses all validation errors.
    ClearValidationErrors,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns a `(changed, actions)` pair: `changed` signals the driver that the
/// display should be refreshed, `actions` lists side effects to run (at most a
/// catalog fetch today).
///
/// # Errors
///
/// Reserved for unrecoverable handler failures; store-level persistence
/// failures are absorbed into validation errors and do not propagate.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?std::mem::discriminant(event)).entered();

    match event {
        Event::QueryChanged(text) => {
            state.session.query = text.clone();
            Ok((true, vec![]))
        }
        Event::EffectiveQuery(query) => {
            let trimmed = query.trim();

            if trimmed.chars().count() < MIN_QUERY_LEN {
                tracing::debug!(query = %query, "query below minimum length, resetting session");
                state.session.query = query.clone();
                state.session.reset();
                return Ok((true, vec![]));
            }

            let generation = state.session.begin(trimmed);
            Ok((
                true,
                vec![Action::FetchCatalog {
                    query: trimmed.to_string(),
                    generation,
                }],
            ))
        }
        Event::SearchCompleted { generation, result } => {
            let applied = state.session.complete(*generation, result.clone());
            Ok((applied, vec![]))
        }
        Event::ClearSearch => {
            state.session.query.clear();
            state.session.reset();
            Ok((true, vec![]))
        }
        Event::AddFavorite(entry) => {
            let title = entry.title.clone();
            match state.store.add(entry.clone()) {
                Ok(AddOutcome::Added) => Ok((true, vec![])),
                Ok(AddOutcome::Duplicate) => {
                    state.set_validation_error(
                        ERROR_DUPLICATE,
                        format!("\"{title}\" is already in your favorites"),
                    );
                    Ok((true, vec![]))
                }
                Err(e) => {
                    warn_persistence(state, &e);
                    Ok((true, vec![]))
                }
            }
        }
        Event::RemoveFavorite(id) => {
            let result = state.store.remove(id);
            absorb_persistence(state, result)
        }
        Event::SetRating { id, rating } => {
            let result = state.store.set_rating(id, *rating);
            absorb_persistence(state, result)
        }
        Event::SetStatus { id, status } => {
            let result = state.store.set_status(id, *status);
            absorb_persistence(state, result)
        }
        Event::SetNotes { id, notes } => {
            let result = state.store.set_notes(id, notes.clone());
            absorb_persistence(state, result)
        }
        Event::SetSort(sort_key) => {
            state.sort_key = *sort_key;
            Ok((true, vec![]))
        }
        Event::SetFilter(filter) => {
            state.status_filter = *filter;
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            let theme = state.theme;
            let result = state.store.save_theme(theme);
            absorb_persistence(state, result)
        }
        Event::ClearValidationErrors => {
            state.validation_errors.clear();
            Ok((true, vec![]))
        }
    }
}

/// Turns a store persistence failure into a warning on the state.
fn warn_persistence(state: &mut AppState, error: &crate::domain::ShelfmarkError) {
    tracing::warn!(error = %error, "durable write failed, keeping in-memory state");
    state.set_validation_error(
        ERROR_PERSISTENCE,
        format!("your changes could not be saved: {error}"),
    );
}

/// Common tail for store operations: absorb a write failure, report changed.
fn absorb_persistence(state: &mut AppState, result: Result<()>) -> Result<(bool, Vec<Action>)> {
    if let Err(e) = result {
        warn_persistence(state, &e);
    }
    Ok((true, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::Theme;
    use crate::app::session::SearchStatus;
    use crate::app::store::FavoritesStore;
    use crate::storage::{MemoryStore, PersistenceAdapter};

    fn state() -> AppState {
        let adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        AppState::new(FavoritesStore::new(adapter), Theme::Light)
    }

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Author".to_string()],
            published_date: None,
            image_url: None,
            categories: vec!["Uncategorized".to_string()],
            page_count: 0,
            average_rating: 0.0,
        }
    }

    #[test]
    fn short_query_never_fetches_and_resets_session() {
        let mut state = state();
        // Seed results from a prior search.
        let generation = state.session.begin("dune");
        state
            .session
            .complete(generation, Ok(vec![entry("a", "Dune")]));

        for query in ["", "h", " h "] {
            let (_, actions) =
                handle_event(&mut state, &Event::EffectiveQuery(query.to_string())).unwrap();
            assert!(actions.is_empty());
            assert_eq!(state.session.status, SearchStatus::Idle);
            assert!(state.session.results.is_empty());
            assert_eq!(state.session.error, None);
        }
    }

    #[test]
    fn effective_query_is_trimmed_and_fetches_once() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::EffectiveQuery("  dune  ".to_string())).unwrap();

        assert_eq!(state.session.status, SearchStatus::Pending);
        assert_eq!(
            actions,
            vec![Action::FetchCatalog {
                query: "dune".to_string(),
                generation: state.session.generation,
            }]
        );
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::EffectiveQuery("har".to_string())).unwrap();
        let Action::FetchCatalog { generation: old, .. } = actions[0].clone();

        // A newer effective query supersedes the first.
        handle_event(&mut state, &Event::EffectiveQuery("harry".to_string())).unwrap();

        let (changed, _) = handle_event(
            &mut state,
            &Event::SearchCompleted {
                generation: old,
                result: Ok(vec![entry("stale", "Stale")]),
            },
        )
        .unwrap();

        assert!(!changed);
        assert_eq!(state.session.status, SearchStatus::Pending);
        assert!(state.session.results.is_empty());
    }

    #[test]
    fn failed_search_records_error_and_clears_results() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::EffectiveQuery("dune".to_string())).unwrap();
        let Action::FetchCatalog { generation, .. } = actions[0].clone();

        handle_event(
            &mut state,
            &Event::SearchCompleted {
                generation,
                result: Err("catalog request failed with status 503".to_string()),
            },
        )
        .unwrap();

        assert_eq!(state.session.status, SearchStatus::Failed);
        assert!(state.session.results.is_empty());
        assert!(state.session.error.as_deref().unwrap().contains("503"));
    }

    #[test]
    fn duplicate_add_surfaces_validation_error() {
        let mut state = state();
        handle_event(&mut state, &Event::AddFavorite(entry("a", "Dune"))).unwrap();
        assert!(state.validation_errors.is_empty());

        handle_event(&mut state, &Event::AddFavorite(entry("a", "Dune"))).unwrap();
        assert_eq!(state.store.favorites().len(), 1);
        assert!(state.validation_errors[ERROR_DUPLICATE].contains("Dune"));

        handle_event(&mut state, &Event::ClearValidationErrors).unwrap();
        assert!(state.validation_errors.is_empty());
    }

    #[test]
    fn toggle_theme_flips_and_persists() {
        let mut state = state();
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme, Theme::Dark);
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn sort_and_filter_events_update_modes() {
        let mut state = state();
        handle_event(&mut state, &Event::SetSort(SortKey::Rating)).unwrap();
        handle_event(
            &mut state,
            &Event::SetFilter(StatusFilter::Only(ReadingStatus::Finished)),
        )
        .unwrap();

        assert_eq!(state.sort_key, SortKey::Rating);
        assert_eq!(
            state.status_filter,
            StatusFilter::Only(ReadingStatus::Finished)
        );
    }

    #[test]
    fn clear_search_empties_query_and_results() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::EffectiveQuery("dune".to_string())).unwrap();
        let Action::FetchCatalog { generation, .. } = actions[0].clone();
        handle_event(
            &mut state,
            &Event::SearchCompleted {
                generation,
                result: Ok(vec![entry("a", "Dune")]),
            },
        )
        .unwrap();

        handle_event(&mut state, &Event::ClearSearch).unwrap();
        assert_eq!(state.session.query, "");
        assert_eq!(state.session.status, SearchStatus::Idle);
        assert!(state.session.results.is_empty());
    }
}
