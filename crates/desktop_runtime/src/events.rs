//! Typed desktop notifications fanned out to UI subscribers over channels.

use std::{cell::RefCell, rc::Rc};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use crate::{
    model::{WindowId, WindowRect},
    snap::SnapZone,
};

#[derive(Debug, Clone, PartialEq)]
/// Notifications produced by window dragging and snapshot bookkeeping.
pub enum DesktopEvent {
    /// The candidate snap zone of a dragged window changed (`None` hides the indicator).
    SnapZoneChanged {
        /// Window being dragged.
        window_id: WindowId,
        /// New candidate zone.
        zone: SnapZone,
    },
    /// A drag ended; `rect` is the applied snap geometry, or `None` when no zone matched.
    SnapGeometryResolved {
        /// Window that was dragged.
        window_id: WindowId,
        /// Applied geometry.
        rect: Option<WindowRect>,
    },
    /// The recovery snapshot list changed; `names` is the new list, newest first.
    SnapshotListChanged {
        /// Snapshot names in list order.
        names: Vec<String>,
    },
}

#[derive(Debug, Clone, Default)]
/// Single-threaded fan-out bus. Clones share subscribers.
pub struct EventBus {
    subscribers: Rc<RefCell<Vec<UnboundedSender<DesktopEvent>>>>,
}

impl EventBus {
    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> UnboundedReceiver<DesktopEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Delivers `event` to every live subscriber; subscribers whose receiver was dropped are
    /// pruned.
    pub fn publish(&self, event: DesktopEvent) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }

    /// Number of registered subscribers that have not been pruned yet.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// Collects every event already queued on `rx` without waiting.
pub fn drain_ready(rx: &mut UnboundedReceiver<DesktopEvent>) -> Vec<DesktopEvent> {
    use futures::{FutureExt, StreamExt};

    let mut events = Vec::new();
    while let Some(Some(event)) = rx.next().now_or_never() {
        events.push(event);
    }
    events
}
