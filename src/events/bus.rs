//! Event bus: an explicit, ordered list of subscriber callbacks.
//!
//! Subscribers are notified synchronously, in subscription order, with every
//! event published after they subscribed. Unsubscribing takes the handle
//! returned by `subscribe`.

use std::fmt;

use super::event::EngineEvent;

/// Handle identifying one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

type Handler = Box<dyn FnMut(&EngineEvent)>;

/// Ordered list of event subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_id: u32,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Returns the handle used to unsubscribe.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a subscription.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Remove every subscription.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver an event to every subscriber in subscription order.
    pub fn publish(&mut self, event: &EngineEvent) {
        log::trace!("event {}", event.name());
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
