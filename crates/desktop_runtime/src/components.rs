//! Leptos views for snap feedback.

use std::future::Future;

use futures::{
    future::{abortable, AbortHandle, Abortable},
    StreamExt,
};
use leptos::*;

use crate::{
    events::{DesktopEvent, EventBus},
    model::{Viewport, WindowRect},
    snap::{resolve_geometry, SnapZone},
};

/// Inline style placing the preview overlay over `rect`.
pub fn preview_style(rect: WindowRect) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        rect.x, rect.y, rect.w, rect.h
    )
}

/// Subscribes to `events` and forwards each snap zone change to `on_zone`.
///
/// The returned future runs until the bus goes away or the handle is aborted. Aborting drops
/// the subscription, so the bus prunes it on its next publish.
fn zone_feed(
    events: &EventBus,
    mut on_zone: impl FnMut(SnapZone) + 'static,
) -> (Abortable<impl Future<Output = ()>>, AbortHandle) {
    let mut rx = events.subscribe();
    abortable(async move {
        while let Some(event) = rx.next().await {
            if let DesktopEvent::SnapZoneChanged { zone, .. } = event {
                on_zone(zone);
            }
        }
    })
}

/// Returns a signal tracking the candidate zone of the current drag, fed from `events`.
///
/// The subscription lives as long as the calling reactive owner and ends in its cleanup.
pub fn snap_zone_signal(events: &EventBus) -> ReadSignal<SnapZone> {
    let (zone, set_zone) = create_signal(SnapZone::None);
    let (feed, handle) = zone_feed(events, move |zone| set_zone.set(zone));
    spawn_local(async move {
        let _ = feed.await;
    });
    on_cleanup(move || handle.abort());
    zone
}

/// Translucent overlay previewing where the dragged window will land; renders nothing while
/// no zone is armed.
#[component]
pub fn SnapPreview(
    #[prop(into)] zone: Signal<SnapZone>,
    #[prop(into)] viewport: Signal<Viewport>,
) -> impl IntoView {
    move || {
        let zone = zone.get();
        let viewport = viewport.get();
        resolve_geometry(zone, viewport.width, viewport.height).map(|rect| {
            view! {
                <div
                    class=format!("snap-preview snap-preview-{}", zone.as_str())
                    style=preview_style(rect)
                    aria-hidden="true"
                ></div>
            }
        })
    }
}
