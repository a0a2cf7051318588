//! State manager.
//!
//! Owns a registry of named [`StateHandler`]s and the ID of the one that is
//! active. The host registers states with [`StateManager::add`], activates
//! them with [`StateManager::switch`] and drives the active one with
//! [`StateManager::update`] once per frame.
//!
//! # Transitions
//!
//! ```text
//!                 switch(id)  [can_exit(x), can_enter(id)]
//!   ┌─────────┐ ─────────────────────────────────▶ ┌────────────┐
//!   │ Unarmed │                                    │ Active(id) │──┐
//!   └─────────┘ ◀───────────────────────────────── └────────────┘  │ switch(other)
//!        ▲        exit() / remove(id) [can_exit]        ▲          │
//!        │                                              └──────────┘
//!        └──── switch(other) whose can_enter refused
//! ```
//!
//! A switch is two-phase: the active state must pass its exit guard and
//! exit before the target's enter guard is even asked. If the exit guard
//! refuses nothing changes. If the enter guard refuses the old state is
//! already gone and the manager ends unarmed.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::config::ManagerConfig;
use super::freeze::{FreezeHandle, FreezeTimer};
use super::handler::StateHandler;
use super::history::{TransitionCause, TransitionHistory, TransitionRecord};
use super::outcome::{ExitOutcome, SwitchOutcome};

/// Registry of named states with a single active state.
///
/// `A` is the argument value handed to `enter`, `exit` and the guards. Use a
/// tuple or a struct to pass several values. It must implement `Default`
/// because a state still active when the manager is dropped is exited with
/// `A::default()`.
pub struct StateManager<A: Default + 'static = ()> {
    config: ManagerConfig,
    registry: HashMap<String, Box<dyn StateHandler<A>>>,
    /// Key into `registry`. The active handler is always looked up.
    current: Option<String>,
    previous: Option<String>,
    time_in_state: f32,
    freeze: FreezeTimer,
    history: TransitionHistory,
}

impl<A: Default + 'static> StateManager<A> {
    /// Create an empty, unarmed manager with the default config.
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        let history = TransitionHistory::with_capacity(config.history_capacity);
        Self {
            config,
            registry: HashMap::new(),
            current: None,
            previous: None,
            time_in_state: 0.0,
            freeze: FreezeTimer::new(),
            history,
        }
    }

    // Registry

    /// Register a state.
    ///
    /// Returns `false` without touching the registry if the ID is empty or
    /// already taken; the existing registration wins.
    pub fn add<H>(&mut self, state_id: &str, handler: H) -> bool
    where
        H: StateHandler<A> + 'static,
    {
        if state_id.is_empty() {
            warn!("ignoring state registration with an empty id");
            return false;
        }

        let id = self.config.normalize(state_id);
        if self.registry.contains_key(id.as_ref()) {
            warn!(state = %id, "state already registered, keeping the existing handler");
            return false;
        }

        debug!(state = %id, "state registered");
        self.registry.insert(id.into_owned(), Box::new(handler));
        true
    }

    /// Unregister a state.
    ///
    /// If it is the active state its exit protocol runs first with `args`.
    /// When that exit is vetoed the state stays registered and active and
    /// this returns `false`. Unknown IDs return `false`.
    pub fn remove(&mut self, state_id: &str, args: A) -> bool {
        let id = self.config.normalize(state_id);
        if !self.registry.contains_key(id.as_ref()) {
            return false;
        }

        if self.current.as_deref() == Some(id.as_ref()) {
            match self.run_exit(&args) {
                ExitOutcome::Vetoed => {
                    warn!(state = %id, "active state refused to exit, not removing");
                    return false;
                }
                ExitOutcome::Exited => {
                    self.record(Some(id.to_string()), None, TransitionCause::Remove);
                }
                ExitOutcome::AlreadyExited => {}
            }
        }

        self.registry.remove(id.as_ref());
        debug!(state = %id, "state removed");
        true
    }

    pub fn contains(&self, state_id: &str) -> bool {
        self.registry
            .contains_key(self.config.normalize(state_id).as_ref())
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Registered IDs in normalized form, in no particular order.
    pub fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    // Transitions

    /// Activate `state_id`, forwarding `args` to the guards and callbacks.
    ///
    /// Checks run in order: frozen, already active, unknown ID. Then the
    /// active state's exit protocol runs, then the target's enter guard,
    /// then its `enter` callback. See [`SwitchOutcome`] for every result.
    pub fn switch(&mut self, state_id: &str, args: A) -> SwitchOutcome {
        if self.freeze.is_frozen() {
            warn!(state = state_id, "switch ignored, state manager is frozen");
            return SwitchOutcome::Frozen;
        }

        let id = self.config.normalize(state_id);
        if self.current.as_deref() == Some(id.as_ref()) {
            return SwitchOutcome::AlreadyActive;
        }
        if !self.registry.contains_key(id.as_ref()) {
            debug!(state = %id, "switch to unknown state ignored");
            return SwitchOutcome::UnknownState;
        }

        // Phase one: leave the active state.
        let from = self.current.clone();
        if self.run_exit(&args) == ExitOutcome::Vetoed {
            debug!(from = ?from, to = %id, "switch vetoed by exit guard");
            return SwitchOutcome::ExitVetoed;
        }

        // Phase two: the target is only committed once its guard passes.
        // The old state is gone by now, so a missing target reads as a refusal.
        let Some(handler) = self.registry.get_mut(id.as_ref()) else {
            if from.is_some() {
                self.record(from, None, TransitionCause::EnterVetoed);
            }
            return SwitchOutcome::EnterVetoed;
        };
        if !handler.can_enter(&args) {
            debug!(from = ?from, to = %id, "switch vetoed by enter guard");
            if from.is_some() {
                self.record(from, None, TransitionCause::EnterVetoed);
            }
            return SwitchOutcome::EnterVetoed;
        }

        let id = id.into_owned();
        self.current = Some(id.clone());
        self.time_in_state = 0.0;
        handler.enter(&args);

        debug!(from = ?from, to = %id, "state switched");
        self.record(from, Some(id), TransitionCause::Switch);
        SwitchOutcome::Switched
    }

    /// Run the exit protocol on the active state.
    ///
    /// Returns `true` when the manager is unarmed afterwards, including when
    /// nothing was active. Returns `false` if the exit guard refused.
    /// A freeze does not block exiting.
    pub fn exit(&mut self, args: A) -> bool {
        let from = self.current.clone();
        match self.run_exit(&args) {
            ExitOutcome::Exited => {
                debug!(from = ?from, "state exited");
                self.record(from, None, TransitionCause::Exit);
                true
            }
            ExitOutcome::AlreadyExited => true,
            ExitOutcome::Vetoed => {
                debug!(from = ?from, "exit vetoed by guard");
                false
            }
        }
    }

    /// Guard check, exit callback, clear. Shared by `switch`, `exit` and
    /// `remove`; recording history is left to the caller.
    fn run_exit(&mut self, args: &A) -> ExitOutcome {
        let Some(id) = self.current.as_deref() else {
            return ExitOutcome::AlreadyExited;
        };
        let Some(handler) = self.registry.get_mut(id) else {
            self.current = None;
            return ExitOutcome::AlreadyExited;
        };

        if !handler.can_exit(args) {
            return ExitOutcome::Vetoed;
        }
        handler.exit(args);

        self.previous = self.current.take();
        self.time_in_state = 0.0;
        ExitOutcome::Exited
    }

    // Per-frame

    /// Advance one frame.
    ///
    /// Ticks the freeze timer (which may fire its callback), then calls the
    /// active state's `update`. Does nothing else when unarmed.
    pub fn update(&mut self, delta_time: f32) {
        self.freeze.tick(delta_time);

        let Some(id) = self.current.as_deref() else {
            return;
        };
        self.time_in_state += delta_time;
        if let Some(handler) = self.registry.get_mut(id) {
            handler.update(delta_time);
        }
    }

    // Freeze

    /// Block `switch` for `duration` seconds of frame time, then run
    /// `after_freeze`.
    ///
    /// Freezing while frozen cancels the pending freeze (its callback never
    /// runs) and starts over.
    pub fn freeze(&mut self, duration: f32, after_freeze: impl FnOnce() + 'static) -> FreezeHandle {
        debug!(duration, "state manager frozen");
        self.freeze.arm(duration, after_freeze)
    }

    /// Lift the freeze now. The pending callback is dropped, not run.
    pub fn unfreeze(&mut self) -> bool {
        self.freeze.cancel()
    }

    /// Lift the freeze only if `handle` is still the pending one.
    pub fn cancel_freeze(&mut self, handle: FreezeHandle) -> bool {
        self.freeze.cancel_handle(handle)
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_frozen()
    }

    pub fn freeze_remaining(&self) -> Option<f32> {
        self.freeze.remaining()
    }

    // Queries

    /// ID of the active state, `None` when unarmed.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_active(&self, state_id: &str) -> bool {
        self.current.as_deref() == Some(self.config.normalize(state_id).as_ref())
    }

    pub fn is_unarmed(&self) -> bool {
        self.current.is_none()
    }

    /// ID of the last state that exited.
    pub fn previous_id(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Seconds of `update` time spent in the active state.
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ManagerSnapshot {
        let mut states: Vec<String> = self.registry.keys().cloned().collect();
        states.sort();
        ManagerSnapshot {
            current: self.current.clone(),
            previous: self.previous.clone(),
            states,
            time_in_state: self.time_in_state,
            frozen: self.is_frozen(),
            freeze_remaining: self.freeze_remaining(),
        }
    }

    fn record(&mut self, from: Option<String>, to: Option<String>, cause: TransitionCause) {
        if self.history.capacity() == 0 {
            return;
        }
        self.history.push(TransitionRecord::new(from, to, cause));
    }
}

impl<A: Default + 'static> Default for StateManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Default + 'static> fmt::Debug for StateManager<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateManager")
            .field("states", &self.registry.len())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("time_in_state", &self.time_in_state)
            .field("freeze", &self.freeze)
            .finish()
    }
}

impl<A: Default + 'static> Drop for StateManager<A> {
    /// Exit a still-active state. Guards are not consulted at teardown.
    fn drop(&mut self) {
        if let Some(id) = self.current.take() {
            if let Some(handler) = self.registry.get_mut(&id) {
                handler.exit(&A::default());
            }
        }
    }
}

/// Point-in-time view of a manager, for debug overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSnapshot {
    pub current: Option<String>,
    pub previous: Option<String>,
    /// Registered IDs, sorted.
    pub states: Vec<String>,
    pub time_in_state: f32,
    pub frozen: bool,
    pub freeze_remaining: Option<f32>,
}

impl ManagerSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "current": self.current,
            "previous": self.previous,
            "states": self.states,
            "time_in_state": self.time_in_state,
            "frozen": self.frozen,
            "freeze_remaining": self.freeze_remaining,
        })
    }
}
