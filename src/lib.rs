//! Tickstate: a tick-driven finite state machine engine
//!
//! Tickstate is meant to be embedded in a host update loop, typically a game
//! loop. The host registers a fixed set of state objects, enters an initial
//! state and calls [`StateMachine::update`] once per frame. The engine runs
//! the lifecycle hooks of the current state and moves between states through
//! the guarded transitions each state owns.
//!
//! # Core Concepts
//!
//! - **State**: any type implementing [`State`]; it owns its outgoing
//!   [`Transitions`] and opts into lifecycle hooks ([`Enter`],
//!   [`EnterWith`], [`Exit`], [`PreUpdate`], [`Update`])
//! - **Transition**: a guarded edge to a destination state, optionally
//!   carrying a payload into the destination's enter hook
//! - **Factory**: builds each registered state once during setup
//!   ([`StateFactory`], [`Container`])
//! - **StateMachine**: holds the current state and drives it per tick
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickstate::{
//!     impl_state, Container, Enter, EnterWith, StateMachineBuilder, Transition, Transitions,
//! };
//!
//! struct Bootstrap {
//!     transitions: Transitions,
//!     loaded: Rc<Cell<bool>>,
//! }
//!
//! impl_state!(Bootstrap, transitions);
//!
//! impl Enter for Bootstrap {
//!     fn on_enter(&mut self) {
//!         self.loaded.set(false);
//!     }
//! }
//!
//! struct LoadScene {
//!     transitions: Transitions,
//!     scene: String,
//! }
//!
//! impl_state!(LoadScene, transitions);
//!
//! impl EnterWith<String> for LoadScene {
//!     fn on_enter_with(&mut self, scene: String) {
//!         self.scene = scene;
//!     }
//! }
//!
//! let loaded = Rc::new(Cell::new(false));
//! let container = Container::new()
//!     .bind_instance(Rc::clone(&loaded))
//!     .bind_state(|c: &Container| {
//!         let loaded: Rc<Cell<bool>> = c.resolve()?;
//!         let guard = Rc::clone(&loaded);
//!         Ok(Bootstrap {
//!             transitions: Transitions::new().with(Transition::with_payload::<LoadScene, String, _>(
//!                 move || guard.get(),
//!                 || "Example Menu Scene".to_string(),
//!             )),
//!             loaded,
//!         })
//!     })
//!     .bind_state(|_: &Container| {
//!         Ok(LoadScene {
//!             transitions: Transitions::new(),
//!             scene: String::new(),
//!         })
//!     });
//!
//! let mut machine = StateMachineBuilder::new(container)
//!     .state::<Bootstrap>()
//!     .state::<LoadScene>()
//!     .build()
//!     .unwrap();
//!
//! machine.change_state::<Bootstrap>().unwrap();
//! machine.update().unwrap();
//! assert!(machine.is_current::<Bootstrap>());
//!
//! loaded.set(true);
//! machine.update().unwrap();
//! assert!(machine.is_current::<LoadScene>());
//! assert_eq!(machine.get_state::<LoadScene>().unwrap().scene, "Example Menu Scene");
//! ```

pub mod builder;
pub mod core;
pub mod factory;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineOptions, StateMachineBuilder};
pub use crate::core::{
    Enter, EnterWith, Exit, Guard, PreUpdate, State, StateId, StateSwitch, Transition,
    TransitionId, Transitions, Update,
};
pub use factory::{ConstructionError, Container, StateFactory};
pub use machine::{MachineStatus, StateMachine, StateMachineError, SubscriptionId, Tick};
