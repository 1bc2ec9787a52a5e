//! `localStorage`-backed key/value store implementation.
//!
//! Writes that the browser rejects with `QuotaExceededError` surface as
//! [`StorageError::QuotaExceeded`]; every other failure is reported as a backend error.

use platform_host::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, Default)]
/// Browser key/value store backed by `window.localStorage`.
pub struct WebKeyValueStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StorageError::Unavailable("localStorage unavailable".to_string()))
}

#[cfg(target_arch = "wasm32")]
fn storage_error(op: &str, err: wasm_bindgen::JsValue) -> StorageError {
    use wasm_bindgen::JsCast;

    let quota = err
        .dyn_ref::<web_sys::DomException>()
        .map(|ex| ex.name() == "QuotaExceededError")
        .unwrap_or(false);
    if quota {
        StorageError::QuotaExceeded
    } else {
        StorageError::Backend(format!("localStorage {op} failed: {err:?}"))
    }
}

impl KeyValueStore for WebKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage().ok()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| storage_error("set_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable(
                "localStorage requires a browser host".to_string(),
            ))
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| storage_error("remove_item", e))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(
                "localStorage requires a browser host".to_string(),
            ))
        }
    }

    fn keys(&self) -> Vec<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Ok(storage) = local_storage() else {
                return Vec::new();
            };
            let len = storage.length().unwrap_or(0);
            (0..len)
                .filter_map(|index| storage.key(index).ok().flatten())
                .collect()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Vec::new()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_build_reports_unavailable_writes() {
        let store = WebKeyValueStore;
        assert_eq!(store.get("k"), None);
        assert!(store.keys().is_empty());
        assert!(matches!(
            store.set("k", "v"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(store.remove("k"), Err(StorageError::Unavailable(_))));
    }
}
