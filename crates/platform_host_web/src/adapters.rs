use platform_host::{KeyValueStore, NoopKeyValueStore, StorageError};

use crate::WebKeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters from `platform_host_web`.
    Browser,
    /// Placeholder adapters used for headless desktop builds.
    DesktopStub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::DesktopStub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::DesktopStub => "desktop-stub",
    }
}

/// Adapter enum that erases the concrete key/value backend behind [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub enum KeyValueStoreAdapter {
    /// Browser-backed `localStorage` persistence.
    Browser(WebKeyValueStore),
    /// No-op fallback used when persistence is intentionally stubbed.
    DesktopStub(NoopKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Browser(store) => store.get(key),
            Self::DesktopStub(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Browser(store) => store.set(key, value),
            Self::DesktopStub(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Browser(store) => store.remove(key),
            Self::DesktopStub(store) => store.remove(key),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            Self::Browser(store) => store.keys(),
            Self::DesktopStub(store) => store.keys(),
        }
    }
}

/// Builds the key/value store for the selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(WebKeyValueStore),
        HostStrategy::DesktopStub => KeyValueStoreAdapter::DesktopStub(NoopKeyValueStore),
    }
}
