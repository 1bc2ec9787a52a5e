//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    events::DesktopEvent,
    model::{
        DesktopState, InteractionState, MoveSession, OpenWindowRequest, PointerPosition, Viewport,
        WindowId, WindowRecord, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    },
    snap::{SnapDragController, SnapZone},
    window_manager::{
        apply_snap_target, cascade_rect, focus_window_internal, normalize_window_stack,
        restore_floating_rect, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window to the usable viewport.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
        /// Usable viewport to maximize into.
        viewport: Viewport,
    },
    /// Return a maximized or snapped window to its floating rect.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
        /// Usable viewport snap zones are measured against.
        viewport: Viewport,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag at `pointer`, snapping when it was released inside a zone.
    EndMove {
        /// Pointer position at release.
        pointer: PointerPosition,
    },
    /// Abort the active drag without snapping (pointer lost, focus lost, escape).
    CancelMove,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current desktop layout.
    PersistLayout,
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
    /// Deliver a typed notification to event subscribers.
    Publish(DesktopEvent),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = next_window_id(state);
            let rect = req
                .rect
                .unwrap_or_else(|| {
                    cascade_rect(window_id.0, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
                })
                .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            state.windows.push(WindowRecord {
                id: window_id,
                title: req.title,
                rect,
                restore_rect: None,
                z_index: 0,
                is_focused: false,
                minimized: false,
                maximized: false,
                snap_zone: SnapZone::None,
                flags: req.flags,
            });
            focus(state, window_id)?;
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() == before_len {
                return Err(ReducerError::WindowNotFound);
            }
            if interaction
                .moving
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.moving = None;
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::FocusWindow { window_id } => {
            focus(state, window_id)?;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            if window.flags.minimizable {
                window.minimized = true;
                window.is_focused = false;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::MaximizeWindow {
            window_id,
            viewport,
        } => {
            let window = find_window_mut(state, window_id)?;
            if !window.maximized && window.snap_zone.is_none() {
                window.restore_rect = Some(window.rect);
            }
            window.rect = viewport.rect().clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            window.maximized = true;
            window.snap_zone = SnapZone::Top;
            focus(state, window_id)?;
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::RestoreWindow { window_id } => {
            find_window_mut(state, window_id)?.minimized = false;
            restore_floating_rect(state, window_id);
            focus(state, window_id)?;
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::BeginMove {
            window_id,
            pointer,
            viewport,
        } => {
            let rect_start = find_window_mut(state, window_id)?.rect;
            focus(state, window_id)?;
            interaction.moving = Some(MoveSession {
                window_id,
                pointer_start: pointer,
                rect_start,
                snap: SnapDragController::new(state.snap, viewport),
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.moving.as_mut() {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                let window_id = session.window_id;
                let previous = session.snap.zone();
                let zone = session.snap.on_drag_move(pointer.x, pointer.y);
                let rect_start = session.rect_start;

                let window = find_window_mut(state, window_id)?;
                if !window.maximized {
                    window.rect = rect_start.offset(dx, dy);
                    window.snap_zone = SnapZone::None;
                }
                if zone != previous {
                    effects.push(RuntimeEffect::Publish(DesktopEvent::SnapZoneChanged {
                        window_id,
                        zone,
                    }));
                }
            }
        }
        DesktopAction::EndMove { pointer } => {
            if let Some(mut session) = interaction.moving.take() {
                let window_id = session.window_id;
                let had_candidate = !session.snap.zone().is_none();
                let target = session.snap.on_drag_end(pointer.x, pointer.y);
                if had_candidate {
                    effects.push(RuntimeEffect::Publish(DesktopEvent::SnapZoneChanged {
                        window_id,
                        zone: SnapZone::None,
                    }));
                }

                let applied = target
                    .filter(|target| apply_snap_target(state, window_id, *target))
                    .map(|target| target.rect);
                effects.push(RuntimeEffect::Publish(DesktopEvent::SnapGeometryResolved {
                    window_id,
                    rect: applied,
                }));
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::CancelMove => {
            if let Some(mut session) = interaction.moving.take() {
                let had_candidate = !session.snap.zone().is_none();
                session.snap.clear();
                if had_candidate {
                    effects.push(RuntimeEffect::Publish(DesktopEvent::SnapZoneChanged {
                        window_id: session.window_id,
                        zone: SnapZone::None,
                    }));
                }
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
    }

    normalize_window_stack(state);
    Ok(effects)
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound)
}

fn focus(state: &mut DesktopState, window_id: WindowId) -> Result<(), ReducerError> {
    if focus_window_internal(state, window_id) {
        Ok(())
    } else {
        Err(ReducerError::WindowNotFound)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    const VIEWPORT: Viewport = Viewport {
        width: 1000,
        height: 700,
    };

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, title: &str) -> WindowId {
        let _ = reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(title)),
        )
        .expect("open window");
        state.windows.last().expect("window").id
    }

    fn drag(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        window_id: WindowId,
        path: &[(i32, i32)],
    ) -> Vec<RuntimeEffect> {
        let (start_x, start_y) = path[0];
        let mut effects = reduce_desktop(
            state,
            interaction,
            DesktopAction::BeginMove {
                window_id,
                pointer: PointerPosition {
                    x: start_x,
                    y: start_y,
                },
                viewport: VIEWPORT,
            },
        )
        .expect("begin move");
        for &(x, y) in &path[1..] {
            effects.extend(
                reduce_desktop(
                    state,
                    interaction,
                    DesktopAction::UpdateMove {
                        pointer: PointerPosition { x, y },
                    },
                )
                .expect("update move"),
            );
        }
        effects
    }

    fn zone_events(effects: &[RuntimeEffect]) -> Vec<SnapZone> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                RuntimeEffect::Publish(DesktopEvent::SnapZoneChanged { zone, .. }) => Some(*zone),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn open_window_focuses_new_window_and_updates_stack() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "Explorer");
        let second = open(&mut state, &mut interaction, "Notepad");

        assert_eq!(state.focused_window_id(), Some(second));
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.windows[0].id, first);
        assert_eq!(state.windows[1].id, second);
        assert_eq!(state.windows[1].z_index, 2);
        assert_eq!(state.windows[1].rect.x, 60);
    }

    #[test]
    fn moving_window_updates_rect_and_emits_zone_changes_only_on_transition() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Terminal");
        let original = state.window(win).expect("window").rect;

        let effects = drag(
            &mut state,
            &mut interaction,
            win,
            &[(400, 300), (425, 340), (10, 340), (8, 340), (400, 340)],
        );

        let moved = state.window(win).expect("window").rect;
        assert_eq!(moved.x, original.x);
        assert_eq!(moved.y, original.y + 40);
        assert_eq!(zone_events(&effects), vec![SnapZone::Left, SnapZone::None]);
    }

    #[test]
    fn pointer_at_coordinate_limits_moves_without_overflow() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Terminal");
        let original = state.window(win).expect("window").rect;

        let effects = drag(
            &mut state,
            &mut interaction,
            win,
            &[(400, 300), (i32::MIN, i32::MAX), (i32::MAX, i32::MIN)],
        );

        let moved = state.window(win).expect("window").rect;
        assert_eq!(moved.x, original.x + (i32::MAX - 400));
        assert_eq!(moved.y, original.y + i32::MIN);
        assert_eq!(zone_events(&effects), vec![SnapZone::BottomLeft, SnapZone::TopRight]);
    }

    #[test]
    fn end_move_in_left_zone_snaps_window_to_left_half() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Explorer");
        let floating = state.window(win).expect("window").rect;

        drag(&mut state, &mut interaction, win, &[(300, 300), (5, 300)]);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndMove {
                pointer: PointerPosition { x: 5, y: 300 },
            },
        )
        .expect("end move");

        let half = WindowRect {
            x: 0,
            y: 0,
            w: 500,
            h: 700,
        };
        let record = state.window(win).expect("window");
        assert_eq!(record.rect, half);
        assert_eq!(record.snap_zone, SnapZone::Left);
        assert!(!record.maximized);
        assert_eq!(record.restore_rect, Some(floating.offset(-295, 0)));
        assert!(interaction.moving.is_none());
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Publish(DesktopEvent::SnapZoneChanged {
                    window_id: win,
                    zone: SnapZone::None,
                }),
                RuntimeEffect::Publish(DesktopEvent::SnapGeometryResolved {
                    window_id: win,
                    rect: Some(half),
                }),
                RuntimeEffect::PersistLayout,
            ]
        );
    }

    #[test]
    fn end_move_at_top_edge_maximizes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Terminal");

        drag(&mut state, &mut interaction, win, &[(300, 300), (500, 0)]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndMove {
                pointer: PointerPosition { x: 500, y: 0 },
            },
        )
        .expect("end move");

        let record = state.window(win).expect("window");
        assert_eq!(record.rect, VIEWPORT.rect());
        assert!(record.maximized);
        assert!(record.restore_rect.is_some());
    }

    #[test]
    fn end_move_outside_zones_resolves_to_none() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Notepad");

        drag(&mut state, &mut interaction, win, &[(300, 300), (350, 320)]);
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndMove {
                pointer: PointerPosition { x: 350, y: 320 },
            },
        )
        .expect("end move");

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Publish(DesktopEvent::SnapGeometryResolved {
                    window_id: win,
                    rect: None,
                }),
                RuntimeEffect::PersistLayout,
            ]
        );
        assert_eq!(state.window(win).expect("window").snap_zone, SnapZone::None);
    }

    #[test]
    fn cancel_move_clears_indicator_without_snapping() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Notepad");

        drag(&mut state, &mut interaction, win, &[(300, 300), (995, 300)]);
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::CancelMove)
            .expect("cancel");

        assert_eq!(zone_events(&effects), vec![SnapZone::None]);
        assert!(interaction.moving.is_none());
        assert_eq!(state.window(win).expect("window").snap_zone, SnapZone::None);

        let again =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::CancelMove).expect("idle");
        assert!(again.is_empty());
    }

    #[test]
    fn restore_returns_snapped_window_to_floating_rect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Explorer");

        drag(&mut state, &mut interaction, win, &[(300, 300), (300, 300)]);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndMove {
                pointer: PointerPosition { x: 990, y: 690 },
            },
        )
        .expect("end move");
        assert_eq!(
            state.window(win).expect("window").snap_zone,
            SnapZone::BottomRight
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        )
        .expect("restore");
        let record = state.window(win).expect("window");
        assert_eq!(record.rect, WindowRect::default().offset(-8, 0));
        assert_eq!(record.snap_zone, SnapZone::None);
    }

    #[test]
    fn closing_the_dragged_window_drops_the_move_session() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "Explorer");
        drag(&mut state, &mut interaction, win, &[(300, 300)]);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: win },
        )
        .expect("close");
        assert!(interaction.moving.is_none());
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::CloseWindow { window_id: win },
            ),
            Err(ReducerError::WindowNotFound)
        );
    }
}
