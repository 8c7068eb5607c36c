//! Guarded transitions between states.
//!
//! A [`Transition`] is owned by its source state and names its destination
//! by type. When its guard passes, it asks the [`StateSwitch`] it was checked
//! against to change into the destination, optionally carrying a payload.
//! The machine applies that request before anything else happens in the
//! tick, so a transition that reports `true` has already caused the change.

use super::guard::Guard;
use super::state::{Enter, EnterWith, State, StateId};
use std::fmt;

type Fire = Box<dyn Fn(&mut StateSwitch)>;
type EnterHook = Box<dyn FnOnce(&mut dyn State)>;

/// A state change waiting to be applied by the machine.
pub(crate) struct PendingChange {
    pub(crate) target: StateId,
    pub(crate) enter: EnterHook,
}

impl PendingChange {
    pub(crate) fn enter<T: Enter>() -> Self {
        Self {
            target: StateId::of::<T>(),
            enter: Box::new(|state: &mut dyn State| {
                if let Some(state) = state.as_any_mut().downcast_mut::<T>() {
                    state.on_enter();
                }
            }),
        }
    }

    pub(crate) fn enter_with<T, P>(payload: P) -> Self
    where
        T: EnterWith<P>,
        P: 'static,
    {
        Self {
            target: StateId::of::<T>(),
            enter: Box::new(move |state: &mut dyn State| {
                if let Some(state) = state.as_any_mut().downcast_mut::<T>() {
                    state.on_enter_with(payload);
                }
            }),
        }
    }
}

/// Change-state port handed to transitions while they are checked.
///
/// Holds at most one request; a later request replaces an earlier one.
#[derive(Default)]
pub struct StateSwitch {
    pending: Option<PendingChange>,
}

impl StateSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a change into `T`, running its [`Enter`] hook.
    pub fn change_state<T: Enter>(&mut self) {
        self.pending = Some(PendingChange::enter::<T>());
    }

    /// Request a change into `T`, handing `payload` to its [`EnterWith`] hook.
    pub fn change_state_with<T, P>(&mut self, payload: P)
    where
        T: EnterWith<P>,
        P: 'static,
    {
        self.pending = Some(PendingChange::enter_with::<T, P>(payload));
    }

    pub fn is_requested(&self) -> bool {
        self.pending.is_some()
    }

    /// Destination of the pending request, if any.
    pub fn requested_target(&self) -> Option<StateId> {
        self.pending.as_ref().map(|change| change.target)
    }

    pub(crate) fn take(&mut self) -> Option<PendingChange> {
        self.pending.take()
    }
}

impl fmt::Debug for StateSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSwitch")
            .field("requested", &self.requested_target())
            .finish()
    }
}

/// A guarded edge to a destination state.
///
/// # Example
///
/// ```rust
/// use tickstate::{impl_state, EnterWith, StateSwitch, Transition, Transitions};
///
/// struct LoadScene {
///     transitions: Transitions,
///     scene: String,
/// }
///
/// impl_state!(LoadScene, transitions);
///
/// impl EnterWith<String> for LoadScene {
///     fn on_enter_with(&mut self, scene: String) {
///         self.scene = scene;
///     }
/// }
///
/// let transition = Transition::with_payload::<LoadScene, String, _>(
///     || true,
///     || "Example Menu Scene".to_string(),
/// );
///
/// let mut switch = StateSwitch::new();
/// assert!(transition.check(&mut switch));
/// assert_eq!(switch.requested_target(), Some(transition.target()));
/// ```
pub struct Transition {
    target: StateId,
    guard: Option<Guard>,
    fire: Fire,
}

impl Transition {
    /// Transition into `T` guarded by `guard`.
    pub fn to<T: Enter>(guard: impl Fn() -> bool + 'static) -> Self {
        Self::unguarded::<T>().guarded(Guard::new(guard))
    }

    /// Transition into `T` with no guard installed. It never fires until
    /// [`change_condition`](Self::change_condition) provides one.
    pub fn unguarded<T: Enter>() -> Self {
        Self {
            target: StateId::of::<T>(),
            guard: None,
            fire: Box::new(|switch: &mut StateSwitch| switch.change_state::<T>()),
        }
    }

    /// Transition into `T` whose payload is produced by `payload` once the
    /// guard has passed.
    pub fn with_payload<T, P, F>(guard: impl Fn() -> bool + 'static, payload: F) -> Self
    where
        T: EnterWith<P>,
        P: 'static,
        F: Fn() -> P + 'static,
    {
        Self {
            target: StateId::of::<T>(),
            guard: Some(Guard::new(guard)),
            fire: Box::new(move |switch: &mut StateSwitch| {
                switch.change_state_with::<T, P>(payload())
            }),
        }
    }

    /// Transition into `T` carrying `P::default()`.
    pub fn with_default_payload<T, P>(guard: impl Fn() -> bool + 'static) -> Self
    where
        T: EnterWith<P>,
        P: Default + 'static,
    {
        Self {
            target: StateId::of::<T>(),
            guard: Some(Guard::new(guard)),
            fire: Box::new(|switch: &mut StateSwitch| {
                switch.change_state_with::<T, P>(P::default())
            }),
        }
    }

    fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn has_condition(&self) -> bool {
        self.guard.is_some()
    }

    /// Replace the guard. The payload producer is left untouched.
    pub fn change_condition(&mut self, guard: Guard) {
        self.guard = Some(guard);
    }

    /// Remove the guard; the transition stops firing.
    pub fn clear_condition(&mut self) {
        self.guard = None;
    }

    /// Evaluate the guard and, if it passes, request the change on `switch`.
    ///
    /// A missing guard counts as failing. Nothing happens when the guard
    /// fails; the payload producer only runs after it passes.
    pub fn check(&self, switch: &mut StateSwitch) -> bool {
        if !self.guard.as_ref().is_some_and(Guard::check) {
            return false;
        }

        (self.fire)(switch);
        true
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target.name())
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`Transitions::add`], used to remove the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

/// Ordered list of a state's outgoing transitions.
///
/// Insertion order is evaluation priority: the first transition whose guard
/// passes wins and later ones are not evaluated.
#[derive(Default)]
pub struct Transitions {
    entries: Vec<(TransitionId, Transition)>,
    next_id: u64,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition, builder style.
    pub fn with(mut self, transition: Transition) -> Self {
        self.add(transition);
        self
    }

    pub fn add(&mut self, transition: Transition) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, transition));
        id
    }

    pub fn remove(&mut self, id: TransitionId) -> Option<Transition> {
        let position = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(position).1)
    }

    /// Replace the guard of every transition targeting `target`.
    ///
    /// Returns how many transitions were updated.
    pub fn change_condition(&mut self, target: StateId, guard: Guard) -> usize {
        let mut updated = 0;
        for (_, transition) in self
            .entries
            .iter_mut()
            .filter(|(_, transition)| transition.target == target)
        {
            transition.change_condition(guard.clone());
            updated += 1;
        }
        updated
    }

    /// Check transitions in order, stopping at the first that fires.
    pub fn try_transit(&self, switch: &mut StateSwitch) -> bool {
        self.entries
            .iter()
            .any(|(_, transition)| transition.check(switch))
    }

    pub fn get(&self, id: TransitionId) -> Option<&Transition> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, transition)| transition)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.entries.iter().map(|(_, transition)| transition)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Transitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
