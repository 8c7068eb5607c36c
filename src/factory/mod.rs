//! State construction.
//!
//! The machine never builds states itself; it asks a [`StateFactory`] for
//! exactly one instance per registered type while it is being set up.
//! [`Container`] is a small binding table hosts can use as that factory
//! when they have no dependency-injection framework of their own.

use crate::core::{State, StateId};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

pub mod error;

pub use error::ConstructionError;

/// Produces fully initialized state instances.
///
/// Called once per registered state type while the machine is built. A
/// failure here is a setup error and aborts the build.
pub trait StateFactory {
    fn create_state<T: State>(&mut self) -> Result<T, ConstructionError>;
}

type Constructor = Box<dyn Fn(&Container) -> Result<Box<dyn Any>, ConstructionError>>;

/// Binding table of shared dependencies and state constructors.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use tickstate::{impl_state, Container, StateFactory, Transitions};
///
/// struct Menu {
///     transitions: Transitions,
///     title: Rc<str>,
/// }
///
/// impl_state!(Menu, transitions);
///
/// let mut container = Container::new()
///     .bind_instance::<Rc<str>>(Rc::from("Main Menu"))
///     .bind_state(|c: &Container| {
///         Ok(Menu {
///             transitions: Transitions::new(),
///             title: c.resolve::<Rc<str>>()?,
///         })
///     });
///
/// let menu: Menu = container.create_state().unwrap();
/// assert_eq!(&*menu.title, "Main Menu");
/// ```
#[derive(Default)]
pub struct Container {
    instances: HashMap<TypeId, Box<dyn Any>>,
    constructors: HashMap<TypeId, Constructor>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a shared dependency. Resolving clones it, so bind handles
    /// (`Rc`, `Arc`) for anything that must be shared.
    pub fn bind_instance<D: Clone + 'static>(mut self, value: D) -> Self {
        self.instances.insert(TypeId::of::<D>(), Box::new(value));
        self
    }

    /// Bind the constructor for state `T`, replacing any earlier binding.
    pub fn bind_state<T, F>(mut self, constructor: F) -> Self
    where
        T: State,
        F: Fn(&Container) -> Result<T, ConstructionError> + 'static,
    {
        self.constructors.insert(
            TypeId::of::<T>(),
            Box::new(move |container: &Container| {
                constructor(container).map(|state| Box::new(state) as Box<dyn Any>)
            }),
        );
        self
    }

    /// Resolve a bound dependency.
    pub fn resolve<D: Clone + 'static>(&self) -> Result<D, ConstructionError> {
        self.instances
            .get(&TypeId::of::<D>())
            .and_then(|value| value.downcast_ref::<D>())
            .cloned()
            .ok_or(ConstructionError::MissingDependency {
                dependency: type_name::<D>(),
            })
    }

    pub fn is_bound<T: 'static>(&self) -> bool {
        self.constructors.contains_key(&TypeId::of::<T>())
    }
}

impl StateFactory for Container {
    fn create_state<T: State>(&mut self) -> Result<T, ConstructionError> {
        let container: &Container = self;
        let state = StateId::of::<T>();
        let constructor = container
            .constructors
            .get(&state.type_id())
            .ok_or(ConstructionError::NotBound { state })?;

        constructor(container)?
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ConstructionError::Failed {
                state,
                reason: "constructor produced a different type".to_string(),
            })
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("instances", &self.instances.len())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transitions;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct BootService {
        loads: Rc<Cell<u32>>,
    }

    struct Bootstrap {
        transitions: Transitions,
        service: BootService,
    }

    crate::impl_state!(Bootstrap, transitions);

    struct Menu {
        transitions: Transitions,
    }

    crate::impl_state!(Menu, transitions);

    fn bootstrap(container: &Container) -> Result<Bootstrap, ConstructionError> {
        Ok(Bootstrap {
            transitions: Transitions::new(),
            service: container.resolve::<BootService>()?,
        })
    }

    #[test]
    fn creates_state_with_resolved_dependency() {
        let loads = Rc::new(Cell::new(0));
        let mut container = Container::new()
            .bind_instance(BootService {
                loads: Rc::clone(&loads),
            })
            .bind_state(bootstrap);

        let state: Bootstrap = container.create_state().unwrap();
        state.service.loads.set(3);

        assert_eq!(loads.get(), 3);
    }

    #[test]
    fn missing_dependency_fails_construction() {
        let mut container = Container::new().bind_state(bootstrap);

        let result = container.create_state::<Bootstrap>();

        assert!(matches!(
            result,
            Err(ConstructionError::MissingDependency { dependency }) if dependency.ends_with("BootService")
        ));
    }

    #[test]
    fn unbound_state_fails_construction() {
        let mut container = Container::new();

        let result = container.create_state::<Menu>();

        assert_eq!(
            result.err(),
            Some(ConstructionError::NotBound {
                state: StateId::of::<Menu>()
            })
        );
    }

    #[test]
    fn constructor_errors_propagate() {
        let mut container = Container::new()
            .bind_state(|_: &Container| Err::<Menu, _>(ConstructionError::failed::<Menu>("no gpu")));

        let error = container.create_state::<Menu>().err().unwrap();

        assert_eq!(error.to_string(), "constructor for state `Menu` failed: no gpu");
    }

    #[test]
    fn each_call_builds_a_fresh_instance() {
        let built = Rc::new(Cell::new(0));
        let mut container = Container::new().bind_state({
            let built = Rc::clone(&built);
            move |_: &Container| {
                built.set(built.get() + 1);
                Ok(Menu {
                    transitions: Transitions::new(),
                })
            }
        });

        container.create_state::<Menu>().unwrap();
        container.create_state::<Menu>().unwrap();

        assert_eq!(built.get(), 2);
        assert!(container.is_bound::<Menu>());
        assert!(!container.is_bound::<Bootstrap>());
    }

    #[test]
    fn later_instance_binding_replaces_earlier() {
        let container = Container::new().bind_instance(1u32).bind_instance(2u32);

        assert_eq!(container.resolve::<u32>(), Ok(2));
    }
}
