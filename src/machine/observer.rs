//! State-change notification.

use crate::core::State;

type Handler = Box<dyn FnMut(&dyn State, Option<&dyn State>)>;

/// Handle returned when subscribing to state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of state-change observers.
///
/// Observers run synchronously in subscription order. A panicking observer
/// is not isolated and prevents later observers from running.
#[derive(Default)]
pub(crate) struct Observers {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&dyn State, Option<&dyn State>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(entry, _)| *entry != id);
        self.handlers.len() != before
    }

    pub(crate) fn notify(&mut self, current: &dyn State, previous: Option<&dyn State>) {
        for (_, handler) in &mut self.handlers {
            handler(current, previous);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}
