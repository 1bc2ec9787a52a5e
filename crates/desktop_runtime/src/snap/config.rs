use platform_host::{load_pref_with, save_pref_with, KeyValueStore};
use serde::{Deserialize, Serialize};

/// Pref key holding the persisted [`SnapConfig`].
pub const SNAP_CONFIG_KEY: &str = "retrodesk.snap_config.v1";

/// Distance (px) from a vertical or top edge that arms edge snapping.
pub const DEFAULT_EDGE_THRESHOLD: i32 = 20;
/// Extent (px) of the corner hot-zone along the vertical axis.
pub const DEFAULT_CORNER_SIZE: i32 = 100;
/// Height (px) of the taskbar band reserved at the bottom of the viewport.
pub const DEFAULT_TASKBAR_HEIGHT: i32 = 60;
/// Largest accepted value for any persisted threshold.
pub const MAX_THRESHOLD: i32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunable thresholds for snap-zone detection.
pub struct SnapConfig {
    /// Distance from an edge that triggers edge snapping.
    pub edge_threshold: i32,
    /// Corner hot-zone size along the secondary axis.
    pub corner_size: i32,
    /// Reserved bottom-bar height subtracted from the window to get the usable viewport.
    pub taskbar_height: i32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            corner_size: DEFAULT_CORNER_SIZE,
            taskbar_height: DEFAULT_TASKBAR_HEIGHT,
        }
    }
}

impl SnapConfig {
    /// Loads the persisted config, falling back to defaults when absent or unreadable.
    ///
    /// Values outside `0..=MAX_THRESHOLD` are clamped into range.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_pref_with::<_, Self>(store, SNAP_CONFIG_KEY) {
            Ok(config) => config.unwrap_or_default().sanitized(),
            Err(err) => {
                leptos::logging::warn!("snap config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Returns a copy with every threshold clamped to `0..=MAX_THRESHOLD`.
    pub fn sanitized(self) -> Self {
        let clamped = Self {
            edge_threshold: self.edge_threshold.clamp(0, MAX_THRESHOLD),
            corner_size: self.corner_size.clamp(0, MAX_THRESHOLD),
            taskbar_height: self.taskbar_height.clamp(0, MAX_THRESHOLD),
        };
        if clamped != self {
            leptos::logging::warn!("snap config out of range, clamped {:?} to {:?}", self, clamped);
        }
        clamped
    }

    /// Persists this config under [`SNAP_CONFIG_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the store write fails.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), String> {
        save_pref_with(store, SNAP_CONFIG_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryKeyValueStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Viewport;
    use crate::snap::{SnapDragController, SnapZone};

    #[test]
    fn missing_config_loads_defaults() {
        let store = MemoryKeyValueStore::default();
        assert_eq!(SnapConfig::load(&store), SnapConfig::default());
    }

    #[test]
    fn partial_config_fills_remaining_fields_with_defaults() {
        let store =
            MemoryKeyValueStore::from_entries([(SNAP_CONFIG_KEY, r#"{"edge_threshold":8}"#)]);
        let config = SnapConfig::load(&store);
        assert_eq!(config.edge_threshold, 8);
        assert_eq!(config.corner_size, DEFAULT_CORNER_SIZE);
        assert_eq!(config.taskbar_height, DEFAULT_TASKBAR_HEIGHT);
    }

    #[test]
    fn corrupt_config_falls_back_to_defaults_and_is_left_in_place() {
        let store = MemoryKeyValueStore::from_entries([(SNAP_CONFIG_KEY, "{oops")]);
        assert_eq!(SnapConfig::load(&store), SnapConfig::default());
        assert_eq!(store.get(SNAP_CONFIG_KEY), Some("{oops".to_string()));
    }

    #[test]
    fn out_of_range_thresholds_are_clamped_on_load() {
        let store = MemoryKeyValueStore::from_entries([(
            SNAP_CONFIG_KEY,
            r#"{"edge_threshold":-2147483648,"corner_size":2147483647,"taskbar_height":-5}"#,
        )]);
        let config = SnapConfig::load(&store);
        assert_eq!(
            config,
            SnapConfig {
                edge_threshold: 0,
                corner_size: MAX_THRESHOLD,
                taskbar_height: 0,
            }
        );
    }

    #[test]
    fn drag_with_negative_persisted_threshold_still_resolves_a_zone() {
        let store = MemoryKeyValueStore::from_entries([(
            SNAP_CONFIG_KEY,
            r#"{"edge_threshold":-2147483648}"#,
        )]);
        let viewport = Viewport {
            width: 1000,
            height: 700,
        };
        let mut controller = SnapDragController::new(SnapConfig::load(&store), viewport);
        assert_eq!(controller.on_drag_move(500, 300), SnapZone::None);
        assert_eq!(controller.on_drag_move(0, 300), SnapZone::Left);
    }

    #[test]
    fn saved_config_round_trips() {
        let store = MemoryKeyValueStore::default();
        let config = SnapConfig {
            edge_threshold: 12,
            corner_size: 64,
            taskbar_height: 40,
        };
        config.save(&store).expect("save");
        assert_eq!(SnapConfig::load(&store), config);
    }
}
