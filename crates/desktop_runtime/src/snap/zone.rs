use serde::{Deserialize, Serialize};

use super::config::SnapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Viewport region a dragged window is attracted to.
pub enum SnapZone {
    /// Left half.
    Left,
    /// Right half.
    Right,
    /// Whole usable area (maximize).
    Top,
    /// Top-left quarter.
    TopLeft,
    /// Top-right quarter.
    TopRight,
    /// Bottom-left quarter.
    BottomLeft,
    /// Bottom-right quarter.
    BottomRight,
    /// No snap.
    #[default]
    None,
}

impl SnapZone {
    /// Returns `true` for [`SnapZone::None`].
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Stable token used in CSS classes and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::None => "none",
        }
    }
}

impl SnapConfig {
    /// Maps a pointer position to a snap zone within a `width` x `height` usable viewport.
    ///
    /// Corners win over edges. Coordinates outside the viewport are accepted: a negative `x`
    /// still counts as touching the left edge.
    pub fn detect_zone(&self, x: i32, y: i32, width: i32, height: i32) -> SnapZone {
        let near_left = x <= self.edge_threshold;
        let near_right = x >= width.saturating_sub(self.edge_threshold);
        let in_top_band = y <= self.corner_size;
        let in_bottom_band = y >= height.saturating_sub(self.corner_size);

        if near_left && in_top_band {
            SnapZone::TopLeft
        } else if near_right && in_top_band {
            SnapZone::TopRight
        } else if near_left && in_bottom_band {
            SnapZone::BottomLeft
        } else if near_right && in_bottom_band {
            SnapZone::BottomRight
        } else if near_left {
            SnapZone::Left
        } else if near_right {
            SnapZone::Right
        } else if y <= self.edge_threshold {
            SnapZone::Top
        } else {
            SnapZone::None
        }
    }
}

/// [`SnapConfig::detect_zone`] with the default thresholds.
pub fn detect_zone(x: i32, y: i32, width: i32, height: i32) -> SnapZone {
    SnapConfig::default().detect_zone(x, y, width, height)
}
