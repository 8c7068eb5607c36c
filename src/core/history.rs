//! State change history tracking.
//!
//! Keeps a bounded, in-memory log of the state changes a machine applied.
//! Nothing here is persisted; the log lives and dies with the machine.

use super::state::StateId;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of entries a machine keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// What triggered a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeCause {
    /// The host called `change_state` directly.
    Host,
    /// A transition of the previous state fired during a tick.
    Transition,
    /// The machine was stopped.
    Stop,
}

/// Record of a single applied state change.
#[derive(Clone, Debug)]
pub struct StateChange {
    /// The state that was current before the change
    pub from: Option<StateId>,
    /// The state that became current, `None` after a stop
    pub to: Option<StateId>,
    pub cause: ChangeCause,
    pub timestamp: DateTime<Utc>,
}

impl StateChange {
    pub fn new(from: Option<StateId>, to: Option<StateId>, cause: ChangeCause) -> Self {
        Self {
            from,
            to,
            cause,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded, ordered history of state changes.
///
/// Once `limit` entries are held the oldest one is dropped for each new
/// record. A limit of `0` disables recording.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{ChangeCause, StateChange, StateHistory, StateId};
///
/// struct Boot;
/// struct Menu;
///
/// let mut history = StateHistory::new(8);
/// history.record(StateChange::new(None, Some(StateId::of::<Boot>()), ChangeCause::Host));
/// history.record(StateChange::new(
///     Some(StateId::of::<Boot>()),
///     Some(StateId::of::<Menu>()),
///     ChangeCause::Transition,
/// ));
///
/// let path: Vec<_> = history.get_path().iter().map(|id| id.name()).collect();
/// assert_eq!(path, ["Boot", "Menu"]);
/// ```
#[derive(Clone, Debug)]
pub struct StateHistory {
    entries: VecDeque<StateChange>,
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl StateHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn record(&mut self, change: StateChange) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(change);
    }

    /// States traversed, oldest first.
    ///
    /// Starts with the `from` of the oldest entry (if any), followed by the
    /// `to` of every entry that entered a state.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::new();
        if let Some(from) = self.entries.front().and_then(|first| first.from) {
            path.push(from);
        }
        path.extend(self.entries.iter().filter_map(|change| change.to));
        path
    }

    /// Time between the oldest and newest recorded change.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = &StateChange> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&StateChange> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
