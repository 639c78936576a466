//! Turn counter. One turn is one evaluated pair, matched or not.

use super::observers::{ObserverId, Observers};

/// Turn count with change notification.
#[derive(Debug, Default)]
pub struct TurnTracker {
    turns: u32,
    observers: Observers<u32>,
}

impl TurnTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(u32) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn increment_turn(&mut self) -> u32 {
        self.turns = self.turns.saturating_add(1);
        log::debug!("turn {}", self.turns);
        self.observers.notify(self.turns);
        self.turns
    }

    /// Overwrite the count (used when resuming a saved game).
    pub fn set_turns(&mut self, turns: u32) {
        self.turns = turns;
        self.observers.notify(self.turns);
    }
}
