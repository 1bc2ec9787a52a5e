//! Window layout and state-recovery runtime for the retro desktop.
//!
//! - [`snap`]: snap-zone detection, zone geometry, and the per-drag snap controller.
//! - [`recovery`]: bounded list of named snapshots of the persisted key space.
//! - [`reducer`] / [`runtime`]: window-manager transitions that apply snap results.
//! - [`events`]: typed notifications for UI subscribers.

pub mod components;
pub mod events;
pub mod model;
pub mod persistence;
pub mod recovery;
pub mod reducer;
pub mod runtime;
pub mod snap;
pub mod window_manager;

pub use components::{preview_style, snap_zone_signal, SnapPreview};
pub use events::{DesktopEvent, EventBus};
pub use model::*;
pub use persistence::{load_layout, persist_layout, LAYOUT_KEY};
pub use recovery::{
    RecoveryError, Snapshot, SnapshotStore, MAX_SNAPSHOTS, SNAPSHOT_LIST_CORRUPT_KEY,
    SNAPSHOT_LIST_KEY,
};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime::DesktopRuntime;
pub use snap::{
    detect_zone, resolve_geometry, DragPhase, SnapConfig, SnapDragController, SnapTarget, SnapZone,
};
