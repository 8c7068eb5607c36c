//! The state machine engine.
//!
//! The engine owns every registered state, tracks which one is current and
//! drives it once per host tick:
//!
//! 1. the current state's pre-update hook runs,
//! 2. its transitions are checked in order and the first that fires changes
//!    the state (exit of the old state, then enter of the new one, then the
//!    change notification),
//! 3. only if nothing fired, the update hook of the current state runs.
//!
//! Everything happens synchronously inside [`StateMachine::update`].

mod engine;
mod error;
mod observer;
pub(crate) mod registry;

pub use engine::{MachineStatus, StateMachine, Tick};
pub use error::StateMachineError;
pub use observer::SubscriptionId;
