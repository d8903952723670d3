//! Shelfmark: a state engine for a personal reading list.
//!
//! Shelfmark is the single source of truth for a search-and-shelve reading
//! list application:
//! - Debounced free-text search against an external book catalog
//! - A deduplicated, persisted favorites collection with per-book annotations
//!   (star rating, reading status, free-text notes)
//! - Derived display views (sort and filter) computed on read
//! - Synchronous durable persistence after every mutation
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Driver (main.rs or embedding UI)                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Favorites store + search session                 │
//! │  - View projection                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────────┐        ┌───────────────────┐
//! │ Catalog Layer     │        │ Storage Layer     │
//! │ (catalog/)        │        │ (storage/)        │
//! │ - Search client   │        │ - KV abstraction  │
//! │ - Query debounce  │        │ - JSON file I/O   │
//! └───────────────────┘        │ - Typed adapter   │
//!                              └───────────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Book models (domain/book)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Control flow
//!
//! User input → [`catalog::Debouncer`] → effective query event →
//! [`app::handle_event`] → [`app::Action::FetchCatalog`] →
//! [`catalog::CatalogClient`] → completion event → session transition. Adding
//! a result flows through the favorites store, which persists the whole
//! collection synchronously within the same turn.
//!
//! # Concurrency model
//!
//! One logical thread of control: the driver owns [`app::AppState`] and
//! processes one event to completion at a time. The catalog request and the
//! debounce timer are the only suspension points; both communicate back via
//! events, so no state is ever shared across concurrent writers and no locks
//! are needed.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;

pub use app::{handle_event, Action, AppState, Event, SortKey, StatusFilter, Theme};
pub use domain::{CatalogEntry, FavoriteBook, ReadingStatus, Result, ShelfmarkError};

use crate::storage::{JsonFileStore, PersistenceAdapter, THEME_KEY};
use std::path::PathBuf;

/// Default catalog search endpoint (Google Books volumes API).
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Fixed result cap per search request.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Default debounce quiet window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Engine configuration.
///
/// Values come from [`Config::default`] or [`Config::from_env`]; embedders
/// may also construct one directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON data file holding favorites and the theme flag.
    pub data_file: PathBuf,

    /// Catalog search endpoint URL.
    pub catalog_url: String,

    /// Result cap sent with every search request.
    pub max_results: u32,

    /// Debounce quiet window in milliseconds.
    pub debounce_ms: u64,

    /// Tracing level when `RUST_LOG` is unset (`trace` … `error`).
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: infrastructure::default_data_file(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from `SHELFMARK_*` environment variables.
    ///
    /// Recognized variables, each optional with a fallback default:
    /// `SHELFMARK_DATA_FILE`, `SHELFMARK_CATALOG_URL`,
    /// `SHELFMARK_MAX_RESULTS`, `SHELFMARK_DEBOUNCE_MS`,
    /// `SHELFMARK_TRACE_LEVEL`. Unparseable numeric values fall back to the
    /// default rather than failing.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let parse_u32 = |name: &str, fallback: u32| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        let parse_u64 = |name: &str, fallback: u64| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            data_file: std::env::var_os("SHELFMARK_DATA_FILE")
                .map_or(defaults.data_file, PathBuf::from),
            catalog_url: std::env::var("SHELFMARK_CATALOG_URL")
                .unwrap_or(defaults.catalog_url),
            max_results: parse_u32("SHELFMARK_MAX_RESULTS", defaults.max_results),
            debounce_ms: parse_u64("SHELFMARK_DEBOUNCE_MS", defaults.debounce_ms),
            trace_level: std::env::var("SHELFMARK_TRACE_LEVEL").ok(),
        }
    }
}

/// Builds the application state from configuration.
///
/// Opens (or creates) the JSON store, loads the persisted favorites
/// collection and theme flag (degrading to an empty collection and light
/// theme on missing or corrupt data), and wires them into a fresh
/// [`AppState`].
///
/// # Errors
///
/// Returns an error only when the data file's parent directory cannot be
/// created; damaged data never prevents startup.
pub fn initialize(config: &Config) -> Result<AppState> {
    let backend = JsonFileStore::open(config.data_file.clone())?;
    let adapter = PersistenceAdapter::new(Box::new(backend));

    let theme = Theme::from_stored(adapter.load_raw(THEME_KEY).as_deref());
    let store = app::FavoritesStore::new(adapter);

    tracing::debug!(
        favorites = store.favorites().len(),
        theme = theme.as_str(),
        "engine initialized"
    );

    Ok(AppState::new(store, theme))
}
