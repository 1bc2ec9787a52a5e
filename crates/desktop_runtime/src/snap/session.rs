use super::{config::SnapConfig, layout::resolve_geometry, zone::SnapZone};
use crate::model::{Viewport, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Snap state of an in-progress drag gesture.
pub enum DragPhase {
    /// No zone is armed.
    #[default]
    Idle,
    /// The pointer is inside `zone`; the indicator should be shown.
    Candidate(SnapZone),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Final snap outcome of a drag gesture.
pub struct SnapTarget {
    /// Zone the gesture ended in.
    pub zone: SnapZone,
    /// Geometry the dragged window should take.
    pub rect: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-gesture snap state machine (`Idle` / `Candidate(zone)`).
///
/// Only the current zone is retained; feeding the same pointer position repeatedly is
/// idempotent.
pub struct SnapDragController {
    config: SnapConfig,
    viewport: Viewport,
    phase: DragPhase,
}

impl SnapDragController {
    /// Creates an idle controller for a usable `viewport`.
    pub fn new(config: SnapConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            phase: DragPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Current candidate zone, [`SnapZone::None`] when idle.
    pub fn zone(&self) -> SnapZone {
        match self.phase {
            DragPhase::Idle => SnapZone::None,
            DragPhase::Candidate(zone) => zone,
        }
    }

    /// Usable viewport the controller resolves against.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the viewport, e.g. after a browser resize mid-gesture.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn detect(&self, x: i32, y: i32) -> SnapZone {
        self.config
            .detect_zone(x, y, self.viewport.width, self.viewport.height)
    }

    /// Re-evaluates the zone for a pointer move and returns it for indicator rendering.
    pub fn on_drag_move(&mut self, x: i32, y: i32) -> SnapZone {
        let zone = self.detect(x, y);
        self.phase = if zone.is_none() {
            DragPhase::Idle
        } else {
            DragPhase::Candidate(zone)
        };
        zone
    }

    /// Resolves the final snap target for a pointer release and returns to `Idle`.
    pub fn on_drag_end(&mut self, x: i32, y: i32) -> Option<SnapTarget> {
        let zone = self.detect(x, y);
        self.phase = DragPhase::Idle;
        resolve_geometry(zone, self.viewport.width, self.viewport.height)
            .map(|rect| SnapTarget { zone, rect })
    }

    /// Aborts the gesture. Safe to call while idle.
    pub fn clear(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn controller() -> SnapDragController {
        SnapDragController::new(
            SnapConfig::default(),
            Viewport {
                width: 1000,
                height: 760,
            },
        )
    }

    #[test]
    fn move_tracks_candidate_and_returns_to_idle() {
        let mut ctrl = controller();
        assert_eq!(ctrl.on_drag_move(5, 300), SnapZone::Left);
        assert_eq!(ctrl.phase(), DragPhase::Candidate(SnapZone::Left));

        assert_eq!(ctrl.on_drag_move(500, 300), SnapZone::None);
        assert_eq!(ctrl.phase(), DragPhase::Idle);
    }

    #[test]
    fn repeated_moves_are_idempotent() {
        let mut ctrl = controller();
        let first = ctrl.on_drag_move(990, 700);
        let after_first = ctrl.clone();
        let second = ctrl.on_drag_move(990, 700);
        assert_eq!(first, SnapZone::BottomRight);
        assert_eq!(first, second);
        assert_eq!(ctrl, after_first);
    }

    #[test]
    fn end_resolves_geometry_and_resets_to_idle() {
        let mut ctrl = controller();
        ctrl.on_drag_move(5, 50);
        let target = ctrl.on_drag_end(5, 50).expect("snap target");
        assert_eq!(target.zone, SnapZone::TopLeft);
        assert_eq!(
            target.rect,
            WindowRect {
                x: 0,
                y: 0,
                w: 500,
                h: 380
            }
        );
        assert_eq!(ctrl.phase(), DragPhase::Idle);
    }

    #[test]
    fn end_uses_release_position_not_last_candidate() {
        let mut ctrl = controller();
        ctrl.on_drag_move(5, 300);
        assert_eq!(ctrl.on_drag_end(500, 300), None);
        assert_eq!(ctrl.zone(), SnapZone::None);
    }

    #[test]
    fn clear_is_safe_when_idle_and_drops_candidate() {
        let mut ctrl = controller();
        ctrl.clear();
        assert_eq!(ctrl.phase(), DragPhase::Idle);

        ctrl.on_drag_move(500, 0);
        assert_eq!(ctrl.zone(), SnapZone::Top);
        ctrl.clear();
        assert_eq!(ctrl.phase(), DragPhase::Idle);
    }

    #[test]
    fn viewport_change_applies_to_following_events() {
        let mut ctrl = controller();
        assert_eq!(ctrl.on_drag_move(590, 300), SnapZone::None);
        ctrl.set_viewport(Viewport {
            width: 600,
            height: 400,
        });
        assert_eq!(ctrl.on_drag_move(590, 300), SnapZone::BottomRight);
    }
}
