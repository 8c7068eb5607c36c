//! Core state machine building blocks.
//!
//! This module contains the pieces a state is made of:
//! - State identity and capability hooks via the `State` trait
//! - Guard predicates for transition control
//! - Ordered, guarded transitions and the change-state port they fire into
//! - Bounded history of applied state changes

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{ChangeCause, StateChange, StateHistory, DEFAULT_HISTORY_LIMIT};
pub use state::{Enter, EnterWith, Exit, PreUpdate, State, StateAny, StateId, Update};
pub use transition::{StateSwitch, Transition, TransitionId, Transitions};

pub(crate) use transition::PendingChange;
