//! Shared window-manager transition helpers used by the desktop reducer.

use crate::{
    model::{DesktopState, WindowId, WindowRect},
    snap::{SnapTarget, SnapZone},
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;

/// Focuses and raises `window_id`, ensuring it is the top/focused non-minimized window.
///
/// Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
        return false;
    };

    let already_focused_top = index + 1 == state.windows.len()
        && state
            .windows
            .get(index)
            .map(|w| w.is_focused && !w.minimized)
            .unwrap_or(false);
    if already_focused_top {
        return true;
    }

    for window in &mut state.windows {
        window.is_focused = false;
    }
    let mut window = state.windows.remove(index);
    window.is_focused = true;
    window.minimized = false;
    state.windows.push(window);
    normalize_window_stack(state);
    true
}

/// Normalizes z-index ordering and focus invariants for all managed windows.
pub fn normalize_window_stack(state: &mut DesktopState) {
    let mut has_focused = false;
    for (idx, window) in state.windows.iter_mut().enumerate() {
        window.z_index = (idx + 1) as u32;
        if window.minimized {
            window.is_focused = false;
        }
        if window.is_focused {
            if has_focused {
                window.is_focused = false;
            } else {
                has_focused = true;
            }
        }
    }

    if !has_focused {
        if let Some(last_non_minimized) = state.windows.iter_mut().rev().find(|w| !w.minimized) {
            last_non_minimized.is_focused = true;
        }
    }
}

/// Applies a resolved snap target to a window and returns whether it was applied.
///
/// `top` maximizes and needs a maximizable window; every other zone tiles and needs a
/// resizable one. The floating rect is remembered only when leaving floating layout, so
/// re-snapping a tiled window still restores to its original size.
pub fn apply_snap_target(
    state: &mut DesktopState,
    window_id: WindowId,
    target: SnapTarget,
) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };

    if window.minimized || target.zone.is_none() {
        return false;
    }
    let allowed = if target.zone == SnapZone::Top {
        window.flags.maximizable
    } else {
        window.flags.resizable
    };
    if !allowed {
        return false;
    }

    let floating = !window.maximized && window.snap_zone.is_none();
    if floating {
        window.restore_rect = Some(window.rect);
    }
    window.rect = target.rect;
    window.maximized = target.zone == SnapZone::Top;
    window.snap_zone = target.zone;
    true
}

/// Returns a maximized or snapped window to its remembered floating rect.
pub fn restore_floating_rect(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    if !window.maximized && window.snap_zone.is_none() {
        return false;
    }
    if let Some(restore_rect) = window.restore_rect.take() {
        window.rect = restore_rect;
    }
    window.maximized = false;
    window.snap_zone = SnapZone::None;
    true
}

/// Default cascade placement for the `n`th opened window (1-based).
pub fn cascade_rect(n: u64, w: i32, h: i32) -> WindowRect {
    let offset = ((n.saturating_sub(1)) % 8) as i32 * 20;
    WindowRect {
        x: 40 + offset,
        y: 48 + offset,
        w,
        h,
    }
}
