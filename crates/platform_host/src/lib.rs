//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services the runtime consumes: the
//! key/value persistence collaborator, typed pref helpers, and time/clock helpers. Concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore, StorageError};
pub use storage::prefs::{load_pref_with, save_pref_with};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now, Clock, SteppingClock, SystemClock};
