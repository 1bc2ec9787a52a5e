use super::zone::SnapZone;
use crate::model::WindowRect;

/// Maps a snap zone to absolute window geometry inside a `width` x `height` usable viewport.
///
/// Halves are split with the floor on the leading side: `left` gets `width / 2` and `right`
/// gets the remainder, so the two always tile the width exactly without overlap. Negative
/// viewport dimensions are treated as zero. Returns `None` only for [`SnapZone::None`].
pub fn resolve_geometry(zone: SnapZone, width: i32, height: i32) -> Option<WindowRect> {
    let width = width.max(0);
    let height = height.max(0);
    let half_w = width / 2;
    let half_h = height / 2;

    let (x, w) = match zone {
        SnapZone::None => return None,
        SnapZone::Top => (0, width),
        SnapZone::Left | SnapZone::TopLeft | SnapZone::BottomLeft => (0, half_w),
        SnapZone::Right | SnapZone::TopRight | SnapZone::BottomRight => (half_w, width - half_w),
    };
    let (y, h) = match zone {
        SnapZone::TopLeft | SnapZone::TopRight => (0, half_h),
        SnapZone::BottomLeft | SnapZone::BottomRight => (half_h, height - half_h),
        _ => (0, height),
    };

    Some(WindowRect { x, y, w, h })
}
