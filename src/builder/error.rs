//! Build errors for the state machine builder.

use crate::core::StateId;
use crate::factory::ConstructionError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
///
/// All of them are setup mistakes: the host should treat them as fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No states registered. Call .state::<T>() before .build()")]
    NoStates,

    #[error("State `{state}` registered more than once")]
    DuplicateState { state: StateId },

    #[error("Failed to construct state `{state}`")]
    Construction {
        state: StateId,
        #[source]
        source: ConstructionError,
    },
}
