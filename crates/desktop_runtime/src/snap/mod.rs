//! Snap-layout engine: zone detection, zone geometry, and the per-drag snap controller.

mod config;
mod layout;
mod session;
mod zone;

pub use config::{SnapConfig, MAX_THRESHOLD, SNAP_CONFIG_KEY};
pub use layout::resolve_geometry;
pub use session::{DragPhase, SnapDragController, SnapTarget};
pub use zone::{detect_zone, SnapZone};
