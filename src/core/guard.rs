//! Guard predicates for controlling transitions.
//!
//! Guards are boolean functions re-evaluated every time a transition is
//! checked. They usually read flags the owning state shares with its hooks,
//! so they must stay cheap and free of side effects.

use std::fmt;
use std::rc::Rc;

/// Replaceable predicate that decides whether a transition fires.
///
/// Cloning a guard shares the predicate, so one guard can be installed on
/// several transitions at once.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::Guard;
///
/// let loaded = Rc::new(Cell::new(false));
/// let guard = Guard::new({
///     let loaded = Rc::clone(&loaded);
///     move || loaded.get()
/// });
///
/// assert!(!guard.check());
/// loaded.set(true);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Rc<dyn Fn() -> bool>,
}

impl Guard {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Guard that never passes.
    pub fn never() -> Self {
        Self::new(|| false)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
