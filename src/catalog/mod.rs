//! Catalog search I/O: the remote lookup client and the debounced query
//! controller.
//!
//! These are the only two asynchronous pieces of the engine. Everything else
//! (state transitions, persistence) is synchronous and driven by the events
//! these produce.
//!
//! # Modules
//!
//! - `client`: reqwest-based catalog search with response normalization
//! - `debounce`: trailing-edge debounce of keystroke-level query input

pub mod client;
pub mod debounce;

pub use client::CatalogClient;
pub use debounce::Debouncer;
