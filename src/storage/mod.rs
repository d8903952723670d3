//! Storage layer for the durable favorites collection and theme flag.
//!
//! This module provides the persistence stack: an opaque string-keyed store
//! abstraction, two implementations of it, and the typed adapter the rest of
//! the engine talks to.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction for storage media
//! - `json`: JSON file-based implementation with atomic writes
//! - `memory`: in-process implementation for tests and embedders
//! - `adapter`: typed encode/decode of the favorites collection and theme

pub mod adapter;
pub mod backend;
pub mod json;
pub mod memory;

pub use adapter::{PersistenceAdapter, FAVORITES_KEY, THEME_KEY};
pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
