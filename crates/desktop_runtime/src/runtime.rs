//! Owned desktop runtime: reducer state, persistence, and event fan-out in one place.

use platform_host::KeyValueStore;

use crate::{
    events::EventBus,
    model::{DesktopState, InteractionState},
    persistence::{load_layout, persist_layout},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    snap::SnapConfig,
};

/// Drives [`reduce_desktop`] and executes its persistence and publish effects.
pub struct DesktopRuntime<S> {
    store: S,
    events: EventBus,
    state: DesktopState,
    interaction: InteractionState,
}

impl<S: KeyValueStore> DesktopRuntime<S> {
    /// Hydrates layout and snap config from `store`.
    pub fn boot(store: S, events: EventBus) -> Self {
        let state = Self::hydrate(&store);
        Self {
            store,
            events,
            state,
            interaction: InteractionState::default(),
        }
    }

    fn hydrate(store: &S) -> DesktopState {
        let snap = SnapConfig::load(store);
        let mut state = load_layout(store).unwrap_or_default();
        state.snap = snap;
        state
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `action`, publishes its events, persists the layout when asked to, and returns
    /// the effects left for the UI layer.
    ///
    /// # Errors
    ///
    /// Propagates [`ReducerError`] from the reducer; no effects run in that case.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action)?;
        let mut remaining = Vec::new();
        for effect in effects {
            match effect {
                RuntimeEffect::Publish(event) => self.events.publish(event),
                RuntimeEffect::PersistLayout => {
                    if let Err(err) = persist_layout(&self.store, &self.state) {
                        leptos::logging::warn!("desktop layout persist failed: {err}");
                    }
                }
                other => remaining.push(other),
            }
        }
        Ok(remaining)
    }

    /// Re-reads layout and snap config from the store, e.g. after a snapshot restore.
    ///
    /// Any in-progress drag is dropped.
    pub fn reload(&mut self) {
        self.interaction = InteractionState::default();
        self.state = Self::hydrate(&self.store);
    }
}
