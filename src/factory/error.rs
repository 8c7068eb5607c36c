//! State construction errors.

use crate::core::StateId;
use thiserror::Error;

/// Errors raised while a factory builds a state
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstructionError {
    #[error("no constructor bound for state `{state}`")]
    NotBound { state: StateId },

    #[error("dependency `{dependency}` is not bound")]
    MissingDependency { dependency: &'static str },

    #[error("constructor for state `{state}` failed: {reason}")]
    Failed { state: StateId, reason: String },
}

impl ConstructionError {
    /// Constructor failure for state `T`.
    pub fn failed<T: 'static>(reason: impl Into<String>) -> Self {
        Self::Failed {
            state: StateId::of::<T>(),
            reason: reason.into(),
        }
    }
}
