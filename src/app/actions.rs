//! Actions representing side effects to be executed by the driver.
//!
//! The event handler is synchronous and never performs I/O beyond the
//! store's own durable writes; anything asynchronous it needs done is
//! returned as an [`Action`] for the driver to execute. Today that is only
//! the catalog fetch: the driver runs it and feeds the outcome back as an
//! [`Event::SearchCompleted`](crate::app::Event::SearchCompleted).

/// Commands emitted by the event handler for the driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue a catalog search for `query`.
    ///
    /// The driver must report completion with the same `generation` so the
    /// session can discard the result if a newer query superseded it.
    FetchCatalog {
        /// Trimmed effective query to send to the catalog.
        query: String,

        /// Generation of the request within the search session.
        generation: u64,
    },
}
