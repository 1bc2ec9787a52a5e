//! Desktop layout persistence over the host key/value store.

use platform_host::{load_pref_with, save_pref_with, KeyValueStore};

use crate::model::DesktopState;

/// Key holding the serialized window layout. Captured by recovery snapshots like any other key.
pub const LAYOUT_KEY: &str = "retrodesk.layout.v1";

/// Loads the persisted layout, returning `None` when absent or unreadable.
pub fn load_layout<S: KeyValueStore + ?Sized>(store: &S) -> Option<DesktopState> {
    match load_pref_with::<_, DesktopState>(store, LAYOUT_KEY) {
        Ok(state) => state,
        Err(err) => {
            leptos::logging::warn!("desktop layout load failed: {err}");
            None
        }
    }
}

/// Persists the window layout. Snap thresholds are stored separately and are not included.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn persist_layout<S: KeyValueStore + ?Sized>(
    store: &S,
    state: &DesktopState,
) -> Result<(), String> {
    save_pref_with(store, LAYOUT_KEY, state)
}
