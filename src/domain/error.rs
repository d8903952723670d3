//! Error types for the Shelfmark engine.
//!
//! This module defines the centralized error type [`ShelfmarkError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Two failure categories deliberately do *not* live here: duplicate-add attempts and
//! persistence warnings are surfaced through the application state's validation-error
//! map (they are user-visible, dismissible conditions rather than call failures), and
//! search failures are stored on the search session so the UI can display and retry
//! them. No error in this crate should ever terminate the process; each one is local
//! to a single user action and leaves prior state intact.

use thiserror::Error;

/// The main error type for Shelfmark operations.
///
/// This enum consolidates all error conditions that can occur in the engine, from
/// storage operations to catalog lookups. Variants carry human-readable messages
/// because every one of them may be shown directly to the user.
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the durable key-value store fails,
    /// including serialization of the favorites collection. The string contains
    /// a description of what went wrong.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog lookup failed.
    ///
    /// Covers transport failures, non-success HTTP responses, and malformed
    /// response bodies from the remote catalog. Recoverable: the user retries by
    /// typing a new query.
    #[error("search failed: {0}")]
    Search(String),

    /// Communication with a background task failed.
    ///
    /// Occurs when the debounce task or a search task has gone away and a channel
    /// send or receive can no longer complete.
    #[error("channel error: {0}")]
    Channel(String),
}

/// A specialized `Result` type for Shelfmark operations.
///
/// This is a type alias for `std::result::Result<T, ShelfmarkError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ShelfmarkError>;
