//! Domain layer for the Shelfmark engine.
//!
//! This module contains the core domain types for the engine, independent of
//! HTTP, storage, or driver concerns. It follows domain-driven design
//! principles by keeping the book model and error taxonomy isolated from
//! external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Catalog entry and favorite book models

pub mod book;
pub mod error;

pub use book::{CatalogEntry, FavoriteBook, ReadingStatus};
pub use error::{Result, ShelfmarkError};
