//! The tick-driven state machine engine.

use super::error::StateMachineError;
use super::observer::{Observers, SubscriptionId};
use super::registry::StateRegistry;
use crate::builder::MachineOptions;
use crate::core::{
    ChangeCause, Enter, EnterWith, PendingChange, State, StateChange, StateHistory, StateId,
    StateSwitch,
};
use std::fmt;
use tracing::{debug, trace, warn};

/// Lifecycle of the engine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineStatus {
    /// Built, no state entered yet
    Uninitialized,
    /// A state is current
    Running,
    /// Halted by [`StateMachine::stop`]; a new `change_state` restarts it
    Stopped,
}

/// What a call to [`StateMachine::update`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No state is current
    Idle,
    /// No transition fired; the update hook ran if the state has one
    Updated,
    /// A transition fired and the update hook was skipped
    Transitioned,
}

/// Holds the registered states and drives the current one.
///
/// Built through [`StateMachineBuilder`](crate::StateMachineBuilder); the set
/// of states is fixed from then on. The host enters an initial state with
/// [`change_state`](Self::change_state), calls [`update`](Self::update) once
/// per tick and [`stop`](Self::stop) on shutdown.
///
/// Hooks, guards and observers get no handle to the machine, so they cannot
/// re-enter it while a change is being applied. States move the machine only
/// through their transitions.
pub struct StateMachine {
    name: String,
    registry: StateRegistry,
    current: Option<StateId>,
    previous: Option<StateId>,
    status: MachineStatus,
    observers: Observers,
    history: StateHistory,
}

impl StateMachine {
    pub(crate) fn new(options: MachineOptions, registry: StateRegistry) -> Self {
        Self {
            name: options.name,
            registry,
            current: None,
            previous: None,
            status: MachineStatus::Uninitialized,
            observers: Observers::default(),
            history: StateHistory::new(options.history_limit),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    /// The current state, `None` before the first change and after a stop.
    pub fn current_state(&self) -> Option<&dyn State> {
        let id = self.current?;
        self.registry.get(id).ok()
    }

    pub fn current_state_id(&self) -> Option<StateId> {
        self.current
    }

    /// The state that was current before the latest change.
    pub fn previous_state_id(&self) -> Option<StateId> {
        self.previous
    }

    pub fn is_current<T: State>(&self) -> bool {
        self.current == Some(StateId::of::<T>())
    }

    /// Look up a registered state.
    ///
    /// Fails with [`StateMachineError::StateNotFound`] if `T` was never
    /// registered.
    pub fn get_state<T: State>(&self) -> Result<&T, StateMachineError> {
        self.registry.get_typed::<T>()
    }

    pub fn get_state_mut<T: State>(&mut self) -> Result<&mut T, StateMachineError> {
        self.registry.get_typed_mut::<T>()
    }

    pub fn is_registered<T: State>(&self) -> bool {
        self.registry.contains(StateId::of::<T>())
    }

    /// Registered states, in registration order.
    pub fn registered_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.registry.ids()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Subscribe to state changes.
    ///
    /// The handler receives the new state and the previous one. It runs
    /// after the new state's enter hook.
    pub fn on_state_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&dyn State, Option<&dyn State>) + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Exit the current state (if it has an exit hook), then enter `T`.
    pub fn change_state<T: Enter>(&mut self) -> Result<(), StateMachineError> {
        self.apply(PendingChange::enter::<T>(), ChangeCause::Host)
    }

    /// Exit the current state, then enter `T` with `payload`.
    pub fn change_state_with<T, P>(&mut self, payload: P) -> Result<(), StateMachineError>
    where
        T: EnterWith<P>,
        P: 'static,
    {
        self.apply(PendingChange::enter_with::<T, P>(payload), ChangeCause::Host)
    }

    /// Drive one tick.
    ///
    /// Runs the current state's pre-update hook, then checks its
    /// transitions. The update hook runs only when no transition fired, on
    /// whatever state is current at that point.
    pub fn update(&mut self) -> Result<Tick, StateMachineError> {
        let Some(current) = self.current else {
            return Ok(Tick::Idle);
        };
        trace!(machine = %self.name, state = %current, "tick");

        let state = self.registry.get_mut(current)?;
        if let Some(hook) = state.as_pre_update() {
            hook.on_pre_update();
        }

        let mut switch = StateSwitch::new();
        let fired = state.try_transit(&mut switch);
        if let Some(change) = switch.take() {
            self.apply(change, ChangeCause::Transition)?;
        }
        if fired {
            return Ok(Tick::Transitioned);
        }

        if let Some(current) = self.current {
            if let Some(hook) = self.registry.get_mut(current)?.as_update() {
                hook.on_update();
            }
        }
        Ok(Tick::Updated)
    }

    /// Exit the current state and clear it. Does nothing when no state is
    /// current.
    pub fn stop(&mut self) {
        let Some(current) = self.current else {
            return;
        };

        self.exit_current();
        self.current = None;
        self.status = MachineStatus::Stopped;
        self.history
            .record(StateChange::new(Some(current), None, ChangeCause::Stop));
        debug!(machine = %self.name, state = %current, "state machine stopped");
    }

    fn apply(&mut self, change: PendingChange, cause: ChangeCause) -> Result<(), StateMachineError> {
        let PendingChange { target, enter } = change;
        if !self.registry.contains(target) {
            warn!(machine = %self.name, state = %target, "change to unregistered state");
            return Err(StateMachineError::StateNotFound { state: target });
        }

        self.exit_current();
        self.previous = self.current.replace(target);
        self.status = MachineStatus::Running;
        enter(self.registry.get_mut(target)?);

        debug!(
            machine = %self.name,
            from = ?self.previous.map(|id| id.name()),
            to = %target,
            ?cause,
            "state changed"
        );
        self.history
            .record(StateChange::new(self.previous, Some(target), cause));
        self.notify(target);
        Ok(())
    }

    fn exit_current(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        if let Ok(state) = self.registry.get_mut(current) {
            if let Some(hook) = state.as_exit() {
                hook.on_exit();
            }
        }
    }

    fn notify(&mut self, current: StateId) {
        let Ok(state) = self.registry.get(current) else {
            return;
        };
        let previous = self.previous.and_then(|id| self.registry.get(id).ok());
        self.observers.notify(state, previous);
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("current", &self.current.map(|id| id.name()))
            .field("previous", &self.previous.map(|id| id.name()))
            .field("states", &self.registry.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
