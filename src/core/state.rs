//! State identity and lifecycle capability hooks.
//!
//! A state is any `'static` type implementing [`State`]. Besides owning its
//! outgoing [`Transitions`], a state advertises which optional lifecycle hooks
//! it supports. The enter hooks ([`Enter`], [`EnterWith`]) are resolved
//! statically by the typed `change_state` calls; [`Exit`], [`PreUpdate`] and
//! [`Update`] are queried at runtime through the capability accessors.

use super::guard::Guard;
use super::transition::{StateSwitch, Transition, TransitionId, Transitions};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identity of a state type.
///
/// Equality and hashing only look at the [`TypeId`]; the type name is kept
/// for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct StateId {
    type_id: TypeId,
    type_name: &'static str,
}

impl StateId {
    /// Identity of the state type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Short type name without module path or generic arguments.
    pub fn name(&self) -> &'static str {
        let path = self.type_name.split('<').next().unwrap_or(self.type_name);
        path.rsplit("::").next().unwrap_or(path)
    }
}

impl PartialEq for StateId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for StateId {}

impl Hash for StateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-erasure helpers every state gets for free.
pub trait StateAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn state_id(&self) -> StateId;
}

impl<T: Any> StateAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn state_id(&self) -> StateId {
        StateId::of::<T>()
    }
}

/// A unit of behavior managed by a [`StateMachine`](crate::StateMachine).
///
/// Implementors own an ordered [`Transitions`] list and opt into runtime
/// hooks by overriding the capability accessors. The [`impl_state!`](crate::impl_state)
/// macro writes this impl for plain structs.
///
/// # Example
///
/// ```rust
/// use tickstate::{Exit, State, Transitions};
///
/// struct Paused {
///     transitions: Transitions,
///     exits: u32,
/// }
///
/// impl State for Paused {
///     fn transitions(&self) -> &Transitions {
///         &self.transitions
///     }
///
///     fn transitions_mut(&mut self) -> &mut Transitions {
///         &mut self.transitions
///     }
///
///     fn as_exit(&mut self) -> Option<&mut dyn Exit> {
///         Some(self)
///     }
/// }
///
/// impl Exit for Paused {
///     fn on_exit(&mut self) {
///         self.exits += 1;
///     }
/// }
///
/// let mut paused = Paused { transitions: Transitions::new(), exits: 0 };
/// assert!(paused.as_exit().is_some());
/// assert!(paused.as_update().is_none());
/// ```
pub trait State: StateAny {
    /// Outgoing transitions, in evaluation order.
    fn transitions(&self) -> &Transitions;

    fn transitions_mut(&mut self) -> &mut Transitions;

    /// Exit capability. `None` means the state has no exit hook.
    fn as_exit(&mut self) -> Option<&mut dyn Exit> {
        None
    }

    /// Pre-update capability, run every tick before transitions are checked.
    fn as_pre_update(&mut self) -> Option<&mut dyn PreUpdate> {
        None
    }

    /// Update capability, run on ticks where no transition fired.
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        None
    }

    fn add_transition(&mut self, transition: Transition) -> TransitionId {
        self.transitions_mut().add(transition)
    }

    fn remove_transition(&mut self, id: TransitionId) -> Option<Transition> {
        self.transitions_mut().remove(id)
    }

    /// Check outgoing transitions in order, stopping at the first one that
    /// fires. Returns whether a transition fired.
    fn try_transit(&self, switch: &mut StateSwitch) -> bool {
        self.transitions().try_transit(switch)
    }

    /// Replace the guard of every transition targeting `T`.
    ///
    /// Returns how many transitions were updated.
    fn change_transition_condition<T: State>(&mut self, guard: Guard) -> usize
    where
        Self: Sized,
    {
        self.transitions_mut()
            .change_condition(StateId::of::<T>(), guard)
    }
}

/// Enter hook without payload.
pub trait Enter: State {
    fn on_enter(&mut self);
}

/// Enter hook receiving a payload of type `P`.
pub trait EnterWith<P>: State {
    fn on_enter_with(&mut self, payload: P);
}

pub trait Exit: State {
    fn on_exit(&mut self);
}

pub trait PreUpdate: State {
    fn on_pre_update(&mut self);
}

pub trait Update: State {
    fn on_update(&mut self);
}
