//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::options::MachineOptions;
use crate::core::{State, StateId};
use crate::factory::{ConstructionError, StateFactory};
use crate::machine::registry::StateRegistry;
use crate::machine::StateMachine;
use std::collections::HashSet;
use tracing::debug;

type Create<F> = fn(&mut F) -> Result<Box<dyn State>, ConstructionError>;

fn create<F: StateFactory, T: State>(factory: &mut F) -> Result<Box<dyn State>, ConstructionError> {
    let state: Box<dyn State> = Box::new(factory.create_state::<T>()?);
    Ok(state)
}

/// Builder for constructing state machines with a fluent API.
///
/// Each registered state type is created exactly once, through the factory,
/// in registration order.
pub struct StateMachineBuilder<F: StateFactory> {
    factory: F,
    options: MachineOptions,
    states: Vec<(StateId, Create<F>)>,
}

impl<F: StateFactory> StateMachineBuilder<F> {
    /// Create a new builder around the factory that will construct states.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            options: MachineOptions::default(),
            states: Vec::new(),
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the name attached to log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = name.into();
        self
    }

    /// Set how many state changes the history keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.options.history_limit = limit;
        self
    }

    /// Register state `T`.
    pub fn state<T: State>(mut self) -> Self {
        let construct: Create<F> = create::<F, T>;
        self.states.push((StateId::of::<T>(), construct));
        self
    }

    /// Build the state machine.
    ///
    /// Fails if no state was registered, a state was registered twice, or the
    /// factory cannot construct one of them. Nothing is constructed when the
    /// registration list itself is invalid.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut seen = HashSet::new();
        if let Some((state, _)) = self.states.iter().find(|(id, _)| !seen.insert(*id)) {
            return Err(BuildError::DuplicateState { state: *state });
        }

        let mut factory = self.factory;
        let mut registry = StateRegistry::new();
        for (id, construct) in self.states {
            let state = construct(&mut factory)
                .map_err(|source| BuildError::Construction { state: id, source })?;
            registry.insert(id, state);
        }

        debug!(
            machine = %self.options.name,
            states = registry.len(),
            "state machine built"
        );
        Ok(StateMachine::new(self.options, registry))
    }
}
