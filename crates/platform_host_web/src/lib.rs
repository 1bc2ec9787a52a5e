//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for the desktop runtime's
//! key/value persistence and viewport measurement. On non-wasm targets the adapters compile to
//! inert stand-ins so the workspace builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;
pub mod viewport;

pub use adapters::{
    host_strategy_name, key_value_store, selected_host_strategy, HostStrategy,
    KeyValueStoreAdapter,
};
pub use storage::local_kv::WebKeyValueStore;
pub use viewport::{inner_window_size, usable_viewport_size};
