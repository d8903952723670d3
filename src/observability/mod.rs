//! Observability: tracing subscriber setup.
//!
//! The engine emits `tracing` spans and events throughout (storage writes,
//! event handling, search lifecycle); this module wires them to a filtered
//! stderr subscriber. Embedders that install their own subscriber can simply
//! skip [`init_tracing`].

mod init;

pub use init::init_tracing;
