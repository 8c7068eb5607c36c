//! Registry of the state instances a machine owns.

use super::error::StateMachineError;
use crate::core::{State, StateId};
use std::collections::HashMap;

/// Maps state identity to the single instance of that state.
///
/// Filled once while the machine is built and never changed afterwards.
#[derive(Default)]
pub(crate) struct StateRegistry {
    states: HashMap<StateId, Box<dyn State>>,
    order: Vec<StateId>,
}

impl StateRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a state under its own identity. Returns `false` (and drops the
    /// state) if that identity is already taken.
    pub(crate) fn insert(&mut self, id: StateId, state: Box<dyn State>) -> bool {
        if self.states.contains_key(&id) {
            return false;
        }
        self.states.insert(id, state);
        self.order.push(id);
        true
    }

    pub(crate) fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    pub(crate) fn get(&self, id: StateId) -> Result<&dyn State, StateMachineError> {
        self.states
            .get(&id)
            .map(|state| &**state)
            .ok_or(StateMachineError::StateNotFound { state: id })
    }

    pub(crate) fn get_mut(&mut self, id: StateId) -> Result<&mut dyn State, StateMachineError> {
        match self.states.get_mut(&id) {
            Some(state) => Ok(&mut **state),
            None => Err(StateMachineError::StateNotFound { state: id }),
        }
    }

    pub(crate) fn get_typed<T: State>(&self) -> Result<&T, StateMachineError> {
        let id = StateId::of::<T>();
        self.get(id)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or(StateMachineError::StateNotFound { state: id })
    }

    pub(crate) fn get_typed_mut<T: State>(&mut self) -> Result<&mut T, StateMachineError> {
        let id = StateId::of::<T>();
        self.get_mut(id)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(StateMachineError::StateNotFound { state: id })
    }

    /// Registered identities, in registration order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.order.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transitions;

    struct Boot {
        transitions: Transitions,
        label: &'static str,
    }

    crate::impl_state!(Boot, transitions);

    struct Menu {
        transitions: Transitions,
    }

    crate::impl_state!(Menu, transitions);

    fn boot(label: &'static str) -> Box<dyn State> {
        Box::new(Boot {
            transitions: Transitions::new(),
            label,
        })
    }

    #[test]
    fn typed_lookup_returns_registered_instance() {
        let mut registry = StateRegistry::new();
        assert!(registry.insert(StateId::of::<Boot>(), boot("first")));

        assert_eq!(registry.get_typed::<Boot>().map(|b| b.label), Ok("first"));
    }

    #[test]
    fn duplicate_insert_keeps_first_instance() {
        let mut registry = StateRegistry::new();
        registry.insert(StateId::of::<Boot>(), boot("first"));

        assert!(!registry.insert(StateId::of::<Boot>(), boot("second")));
        assert_eq!(registry.get_typed::<Boot>().map(|b| b.label), Ok("first"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregistered_lookup_fails() {
        let registry = StateRegistry::new();

        assert_eq!(
            registry.get_typed::<Menu>().err(),
            Some(StateMachineError::StateNotFound {
                state: StateId::of::<Menu>()
            })
        );
        assert!(registry.get(StateId::of::<Menu>()).is_err());
    }

    #[test]
    fn mutable_lookup_reaches_instance() {
        let mut registry = StateRegistry::new();
        registry.insert(StateId::of::<Boot>(), boot("first"));

        registry.get_typed_mut::<Boot>().unwrap().label = "changed";

        assert_eq!(registry.get_typed::<Boot>().map(|b| b.label), Ok("changed"));
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut registry = StateRegistry::new();
        registry.insert(StateId::of::<Menu>(), Box::new(Menu { transitions: Transitions::new() }));
        registry.insert(StateId::of::<Boot>(), boot("first"));

        let ids: Vec<_> = registry.ids().collect();

        assert_eq!(ids, vec![StateId::of::<Menu>(), StateId::of::<Boot>()]);
        assert!(registry.contains(StateId::of::<Boot>()));
    }
}
