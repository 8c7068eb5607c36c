//! Builder API for setting up state machines.
//!
//! This module provides the fluent [`StateMachineBuilder`], the
//! [`MachineOptions`] hosts can load from configuration, and the
//! [`impl_state!`](crate::impl_state) macro that removes the boilerplate of
//! implementing [`State`](crate::State) for plain structs.

pub mod error;
pub mod machine;
pub mod macros;
pub mod options;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use options::MachineOptions;
