//! Synchronous key/value persistence contract and in-memory adapters.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by a [`KeyValueStore`] write.
pub enum StorageError {
    /// The backing store rejected the write because its quota is exhausted.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// The backing store is not reachable on this host.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Host key/value store holding opaque string values (browser `localStorage` semantics).
///
/// All methods take `&self`; implementations use interior mutability so a single handle can be
/// shared between the runtime and its collaborators.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, creating the key if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the store has no room left for the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every key currently set.
    fn keys(&self) -> Vec<String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op key/value store for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Default)]
struct MemoryEntries {
    values: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryEntries {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory key/value store. Clones share the same entries.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<MemoryEntries>>,
}

impl MemoryKeyValueStore {
    /// Creates a store that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota_bytes = Some(quota_bytes);
        store
    }

    /// Creates a store pre-populated with `entries`.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        store.inner.borrow_mut().values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        store
    }

    /// Replaces the byte quota; `None` removes it.
    pub fn set_quota(&self, quota_bytes: Option<usize>) {
        self.inner.borrow_mut().quota_bytes = quota_bytes;
    }

    /// Copies all entries out of the store.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.inner.borrow().values.clone()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = inner.quota_bytes {
            if inner.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.inner.borrow().values.keys().cloned().collect()
    }
}
