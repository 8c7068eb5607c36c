//! Runtime errors raised by the state machine engine.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur while driving a built machine
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateMachineError {
    /// The requested state type was never registered. This is a setup
    /// mistake, not something to recover from at runtime.
    #[error("state `{state}` is not registered with this machine")]
    StateNotFound { state: StateId },
}
