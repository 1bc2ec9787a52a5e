use serde::{Deserialize, Serialize};

use crate::snap::{SnapConfig, SnapDragController, SnapZone};

pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Usable desktop area in pixels: the browser viewport minus the taskbar band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Builds the usable viewport from the raw window size, clamping at zero.
    pub fn usable(inner_width: i32, inner_height: i32, taskbar_height: i32) -> Self {
        Self {
            width: inner_width.max(0),
            height: inner_height.saturating_sub(taskbar_height).max(0),
        }
    }

    pub fn rect(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.width,
            h: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFlags {
    pub resizable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            resizable: true,
            minimizable: true,
            maximizable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub rect: WindowRect,
    /// Floating geometry to return to when leaving a maximized or snapped layout.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub is_focused: bool,
    pub minimized: bool,
    pub maximized: bool,
    #[serde(default)]
    pub snap_zone: SnapZone,
    pub flags: WindowFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub windows: Vec<WindowRecord>,
    #[serde(skip)]
    pub snap: SnapConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            snap: SnapConfig::default(),
        }
    }
}

impl DesktopState {
    pub fn with_snap_config(snap: SnapConfig) -> Self {
        Self {
            snap,
            ..Self::default()
        }
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| w.id)
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub title: String,
    pub rect: Option<WindowRect>,
    pub flags: WindowFlags,
}

impl OpenWindowRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rect: None,
            flags: WindowFlags::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// One in-progress window drag: where it started plus its snap controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub snap: SnapDragController,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub moving: Option<MoveSession>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn offset_saturates_at_coordinate_limits() {
        let rect = WindowRect {
            x: 10,
            y: -10,
            w: 100,
            h: 80,
        };
        assert_eq!(
            rect.offset(i32::MAX, i32::MIN),
            WindowRect {
                x: i32::MAX,
                y: i32::MIN,
                w: 100,
                h: 80,
            }
        );
        assert_eq!(rect.offset(-4, 6), WindowRect { x: 6, y: -4, ..rect });
    }
}
