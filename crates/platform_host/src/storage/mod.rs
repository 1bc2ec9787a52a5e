//! Persistence contracts consumed by the desktop runtime.

pub mod kv;
pub mod prefs;
