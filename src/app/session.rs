//! Search session state machine.
//!
//! Tracks the lifecycle of the current catalog search: the live query text,
//! whether a request is in flight, its results, and its last error. The
//! session is short-lived state, rebuilt implicitly whenever a new effective
//! query is issued and never persisted.
//!
//! # State machine
//!
//! ```text
//! idle --(effective query, trimmed len >= 2)--> pending --(success)--> succeeded
//!                                               pending --(failure)--> failed
//! any state --(query cleared or too short)--> idle   (results and error cleared)
//! ```
//!
//! Each issued request carries a generation number. A response is applied only
//! when its generation still matches the session's current one, so a slow
//! stale response can never overwrite results of a newer query.

use crate::domain::CatalogEntry;

/// Minimum trimmed query length that triggers a catalog request.
pub const MIN_QUERY_LEN: usize = 2;

/// In-flight status of the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search active; results and error are empty.
    #[default]
    Idle,

    /// A catalog request is in flight.
    Pending,

    /// The last request completed and `results` holds its entries.
    Succeeded,

    /// The last request failed and `error` holds its message.
    Failed,
}

/// State of the current catalog search.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// Live query text as typed by the user.
    pub query: String,

    /// Lifecycle status of the current request, if any.
    pub status: SearchStatus,

    /// Results of the most recent successful request.
    pub results: Vec<CatalogEntry>,

    /// Message of the most recent failure; present only when `status` is
    /// [`SearchStatus::Failed`].
    pub error: Option<String>,

    /// Generation of the most recently issued request. Monotonically
    /// increasing; used to discard stale completions.
    pub generation: u64,
}

impl SearchSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the session back to idle, clearing results and error.
    ///
    /// Bumps the generation so any still in-flight request is discarded when
    /// it completes.
    pub fn reset(&mut self) {
        self.status = SearchStatus::Idle;
        self.results.clear();
        self.error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Starts a new request for `query` and returns its generation.
    ///
    /// Supersedes any in-flight request: the returned generation becomes the
    /// only one whose completion will be applied. Results of the prior query
    /// are cleared immediately rather than lingering through the pending
    /// window.
    pub fn begin(&mut self, query: &str) -> u64 {
        self.query = query.to_string();
        self.status = SearchStatus::Pending;
        self.results.clear();
        self.error = None;
        self.generation = self.generation.wrapping_add(1);

        tracing::debug!(query = %query, generation = self.generation, "search issued");
        self.generation
    }

    /// Applies a request completion if it is still current.
    ///
    /// Returns `true` when the completion was applied, `false` when it was
    /// discarded as stale.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<CatalogEntry>, String>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale search completion"
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                tracing::debug!(result_count = results.len(), "search succeeded");
                self.status = SearchStatus::Succeeded;
                self.results = results;
                self.error = None;
            }
            Err(message) => {
                tracing::debug!(error = %message, "search failed");
                self.status = SearchStatus::Failed;
                self.results.clear();
                self.error = Some(message);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: "Title".to_string(),
            authors: vec!["Author".to_string()],
            published_date: None,
            image_url: None,
            categories: vec!["Uncategorized".to_string()],
            page_count: 0,
            average_rating: 0.0,
        }
    }

    #[test]
    fn begin_then_success_transitions_to_succeeded() {
        let mut session = SearchSession::new();
        let generation = session.begin("dune");
        assert_eq!(session.status, SearchStatus::Pending);
        assert!(session.results.is_empty());

        assert!(session.complete(generation, Ok(vec![entry("a")])));
        assert_eq!(session.status, SearchStatus::Succeeded);
        assert_eq!(session.results.len(), 1);
        assert_eq!(session.error, None);
    }

    #[test]
    fn new_query_clears_prior_results_while_pending() {
        let mut session = SearchSession::new();
        let generation = session.begin("dune");
        session.complete(generation, Ok(vec![entry("a")]));
        assert_eq!(session.results.len(), 1);

        session.begin("hobbit");
        assert_eq!(session.status, SearchStatus::Pending);
        assert!(session.results.is_empty());
    }

    #[test]
    fn failure_clears_results_and_records_error() {
        let mut session = SearchSession::new();
        let generation = session.begin("dune");
        session.complete(generation, Ok(vec![entry("a")]));

        let generation = session.begin("dune messiah");
        assert!(session.complete(generation, Err("boom".to_string())));
        assert_eq!(session.status, SearchStatus::Failed);
        assert!(session.results.is_empty());
        assert_eq!(session.error.as_deref(), Some("boom"));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = SearchSession::new();
        let old = session.begin("har");
        let _new = session.begin("harry potter");

        assert!(!session.complete(old, Ok(vec![entry("stale")])));
        assert_eq!(session.status, SearchStatus::Pending);
        assert!(session.results.is_empty());
    }

    #[test]
    fn reset_discards_in_flight_request() {
        let mut session = SearchSession::new();
        let generation = session.begin("dune");
        session.reset();

        assert!(!session.complete(generation, Ok(vec![entry("late")])));
        assert_eq!(session.status, SearchStatus::Idle);
        assert!(session.results.is_empty());
        assert_eq!(session.error, None);
    }
}
