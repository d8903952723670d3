//! Durable store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the durable
//! string-keyed storage medium. The engine only ever needs opaque get/set of
//! serialized values; anything richer (typed encode/decode, defaulting on corrupt
//! data) lives in the [`PersistenceAdapter`](crate::storage::PersistenceAdapter)
//! layered on top.
//!
//! # Design Philosophy
//!
//! The trait is intentionally minimal so the same engine can sit on a JSON file,
//! an in-memory map, or whatever key-value medium an embedding UI provides. Each
//! method maps directly to one use of the persistence adapter.

use crate::domain::error::Result;

/// Abstraction over durable string-keyed storage.
///
/// Implementations must persist `set` values synchronously before returning, so
/// a crash after a mutating call returns never loses that mutation.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): single JSON file with
///   atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map for tests and
///   embedders without a filesystem
pub trait KeyValueStore: Send {
    /// Retrieves the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be completed durably.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
