//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core engine logic layer, sitting between the
//! driver (main.rs or an embedding UI) and the domain/storage/catalog layers.
//! It implements the event-driven architecture that powers the reading list.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Search Completions ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Sort, filter, and theme display mode types
//! - [`projection`]: Pure computation of the sorted, filtered display list
//! - [`session`]: Search session state machine with generation guarding
//! - [`state`]: Central application state container
//! - [`store`]: Authoritative favorites collection with synchronous persistence

pub mod actions;
pub mod handler;
pub mod modes;
pub mod projection;
pub mod session;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{SortKey, StatusFilter, Theme};
pub use projection::project;
pub use session::{SearchSession, SearchStatus, MIN_QUERY_LEN};
pub use state::{AppState, ValidationErrors, ERROR_DUPLICATE, ERROR_PERSISTENCE};
pub use store::{AddOutcome, FavoritesStore};
