//! Typed preference helpers layered over a [`KeyValueStore`].

use serde::{de::DeserializeOwned, Serialize};

use super::kv::KeyValueStore;

/// Loads and deserializes a typed preference value stored as JSON text.
///
/// # Errors
///
/// Returns an error when the stored JSON does not deserialize into `T`.
pub fn load_pref_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get(key) else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value as JSON text.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_pref_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw).map_err(|e| e.to_string())
}
