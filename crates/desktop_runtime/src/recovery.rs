//! Point-in-time snapshots of the persisted desktop key space.
//!
//! A [`SnapshotStore`] owns the newest-first list of [`Snapshot`]s, persisted as one JSON array
//! under [`SNAPSHOT_LIST_KEY`]. Capturing reads every other key; restoring writes a snapshot's
//! keys back over the live store. Restore is a merge: keys the snapshot does not mention are
//! left as they are.

use std::collections::BTreeMap;

use platform_host::{Clock, KeyValueStore, StorageError, SystemClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::{DesktopEvent, EventBus};

/// Reserved key holding the serialized snapshot list. Never captured into a snapshot.
pub const SNAPSHOT_LIST_KEY: &str = "retrodesk.recovery.snapshots.v1";
/// Reserved key that keeps an unreadable list record once a new list replaces it.
pub const SNAPSHOT_LIST_CORRUPT_KEY: &str = "retrodesk.recovery.snapshots.v1.corrupt";
/// Maximum number of snapshots retained; capture evicts the oldest beyond this.
pub const MAX_SNAPSHOTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Named copy of the persisted key space at capture time.
pub struct Snapshot {
    /// Unique name within the list.
    pub name: String,
    /// Captured key/value pairs.
    pub data: BTreeMap<String, String>,
    /// Capture time in unix milliseconds.
    pub created: u64,
    /// Byte length of `data` serialized as JSON.
    pub size: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Snapshot store failures surfaced to the UI layer.
pub enum RecoveryError {
    /// No snapshot with this name is in the list.
    #[error("snapshot `{name}` not found")]
    NotFound {
        /// Requested snapshot name.
        name: String,
    },
    /// The persisted store rejected a write for lack of space.
    #[error("storage is full")]
    StorageFull,
    /// A snapshot record could not be parsed or serialized.
    #[error("snapshot record is malformed: {0}")]
    Serialization(String),
    /// Any other persisted-store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for RecoveryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded => Self::StorageFull,
            other => Self::Storage(other.to_string()),
        }
    }
}

fn is_reserved_key(key: &str) -> bool {
    key == SNAPSHOT_LIST_KEY || key == SNAPSHOT_LIST_CORRUPT_KEY
}

fn serialized_size(data: &BTreeMap<String, String>) -> Result<usize, RecoveryError> {
    serde_json::to_string(data)
        .map(|raw| raw.len())
        .map_err(|e| RecoveryError::Serialization(e.to_string()))
}

/// Snapshot list manager over an injected key/value store and clock.
pub struct SnapshotStore<S, C = SystemClock> {
    store: S,
    clock: C,
    snapshots: Vec<Snapshot>,
    load_error: Option<RecoveryError>,
    corrupt_record: Option<String>,
    events: Option<EventBus>,
}

impl<S: KeyValueStore> SnapshotStore<S, SystemClock> {
    /// Opens the store with the wall clock.
    pub fn open_with_system_clock(store: S) -> Self {
        Self::open(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SnapshotStore<S, C> {
    /// Loads the persisted snapshot list.
    ///
    /// A record that fails to parse is logged and treated as an empty list. The first list
    /// mutation afterwards copies the raw record to [`SNAPSHOT_LIST_CORRUPT_KEY`] before
    /// replacing it.
    pub fn open(store: S, clock: C) -> Self {
        let mut load_error = None;
        let mut corrupt_record = None;
        let mut snapshots = match store.get(SNAPSHOT_LIST_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Snapshot>>(&raw) {
                Ok(snapshots) => snapshots,
                Err(err) => {
                    leptos::logging::warn!(
                        "snapshot list under `{SNAPSHOT_LIST_KEY}` is unreadable, starting empty: {err}"
                    );
                    load_error = Some(RecoveryError::Serialization(err.to_string()));
                    corrupt_record = Some(raw.clone());
                    Vec::new()
                }
            },
        };
        snapshots.truncate(MAX_SNAPSHOTS);

        Self {
            store,
            clock,
            snapshots,
            load_error,
            corrupt_record,
            events: None,
        }
    }

    /// Attaches a bus that receives [`DesktopEvent::SnapshotListChanged`] after each mutation.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Parse failure recovered from at [`SnapshotStore::open`], if any.
    pub fn load_error(&self) -> Option<&RecoveryError> {
        self.load_error.as_ref()
    }

    /// Snapshots, newest first.
    pub fn list(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Looks up a snapshot by name.
    pub fn get(&self, name: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.name == name)
    }

    /// Backing key/value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Captures every persisted key except the reserved snapshot keys into a new snapshot.
    ///
    /// `name` defaults to a capture-time derived name. A snapshot already holding the chosen
    /// name is replaced. Only the reserved snapshot keys are written.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::StorageFull`] when the updated list does not fit; the in-memory
    /// list is left unchanged in that case.
    pub fn capture(&mut self, name: Option<&str>) -> Result<Snapshot, RecoveryError> {
        let data: BTreeMap<String, String> = self
            .store
            .keys()
            .into_iter()
            .filter(|key| !is_reserved_key(key))
            .filter_map(|key| self.store.get(&key).map(|value| (key, value)))
            .collect();
        let created = self.clock.now_ms();
        let name = match name {
            Some(name) => name.to_string(),
            None => self.default_name(created),
        };
        let snapshot = Snapshot {
            size: serialized_size(&data)?,
            name,
            data,
            created,
        };

        self.insert_newest(snapshot.clone())?;
        leptos::logging::log!(
            "captured snapshot `{}` ({} keys, {} bytes)",
            snapshot.name,
            snapshot.data.len(),
            snapshot.size
        );
        Ok(snapshot)
    }

    /// Writes every key of the named snapshot over the live store.
    ///
    /// Keys absent from the snapshot are kept. The snapshot list is not modified. Returns the
    /// number of keys written.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::NotFound`] for an unknown name. A storage failure stops the
    /// restore; keys written before it stay written.
    pub fn restore(&self, name: &str) -> Result<usize, RecoveryError> {
        let snapshot = self.find(name)?;
        let mut written = 0;
        for (key, value) in &snapshot.data {
            if is_reserved_key(key) {
                continue;
            }
            self.store.set(key, value)?;
            written += 1;
        }
        leptos::logging::log!("restored snapshot `{name}` ({written} keys)");
        Ok(written)
    }

    /// Removes the named snapshot and persists the shorter list.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::NotFound`] when no snapshot has that name.
    pub fn delete(&mut self, name: &str) -> Result<Snapshot, RecoveryError> {
        let index = self
            .snapshots
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| RecoveryError::NotFound {
                name: name.to_string(),
            })?;
        let mut next = self.snapshots.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        leptos::logging::log!("deleted snapshot `{name}`");
        Ok(removed)
    }

    /// Serializes the full snapshot record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::NotFound`] for an unknown name.
    pub fn export(&self, name: &str) -> Result<Vec<u8>, RecoveryError> {
        let snapshot = self.find(name)?;
        serde_json::to_vec_pretty(snapshot).map_err(|e| RecoveryError::Serialization(e.to_string()))
    }

    /// Adds a previously exported snapshot record as the newest entry.
    ///
    /// Reserved snapshot keys are dropped from the record's data and `size` is recomputed. A
    /// snapshot with the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::Serialization`] for malformed input and
    /// [`RecoveryError::StorageFull`] when the updated list does not fit.
    pub fn import(&mut self, raw: &[u8]) -> Result<Snapshot, RecoveryError> {
        let mut snapshot: Snapshot =
            serde_json::from_slice(raw).map_err(|e| RecoveryError::Serialization(e.to_string()))?;
        snapshot.data.retain(|key, _| !is_reserved_key(key));
        snapshot.size = serialized_size(&snapshot.data)?;

        self.insert_newest(snapshot.clone())?;
        leptos::logging::log!("imported snapshot `{}`", snapshot.name);
        Ok(snapshot)
    }

    fn find(&self, name: &str) -> Result<&Snapshot, RecoveryError> {
        self.get(name).ok_or_else(|| RecoveryError::NotFound {
            name: name.to_string(),
        })
    }

    fn default_name(&self, created: u64) -> String {
        let base = format!("snapshot-{created}");
        if self.get(&base).is_none() {
            return base;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{base}-{suffix}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn insert_newest(&mut self, snapshot: Snapshot) -> Result<(), RecoveryError> {
        let mut next: Vec<Snapshot> = self
            .snapshots
            .iter()
            .filter(|s| s.name != snapshot.name)
            .cloned()
            .collect();
        next.insert(0, snapshot);
        next.truncate(MAX_SNAPSHOTS);
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<Snapshot>) -> Result<(), RecoveryError> {
        let raw =
            serde_json::to_string(&next).map_err(|e| RecoveryError::Serialization(e.to_string()))?;
        if let Some(corrupt) = self.corrupt_record.as_deref() {
            self.store.set(SNAPSHOT_LIST_CORRUPT_KEY, corrupt)?;
            leptos::logging::warn!(
                "moved unreadable snapshot list to `{SNAPSHOT_LIST_CORRUPT_KEY}` before rewriting it"
            );
        }
        self.store.set(SNAPSHOT_LIST_KEY, &raw)?;
        self.snapshots = next;
        self.load_error = None;
        self.corrupt_record = None;
        if let Some(events) = &self.events {
            events.publish(DesktopEvent::SnapshotListChanged {
                names: self.snapshots.iter().map(|s| s.name.clone()).collect(),
            });
        }
        Ok(())
    }
}
