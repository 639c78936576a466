//! Observer lists for counter values.

use std::fmt;

/// Handle identifying one observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Callbacks notified with a new value on every change, in subscription order.
pub struct Observers<T> {
    entries: Vec<(ObserverId, Box<dyn FnMut(T)>)>,
    next_id: u32,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Copy> Observers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(T) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Returns true if the observer was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, value: T) {
        for (_, observer) in &mut self.entries {
            observer(value);
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("count", &self.entries.len()).finish()
    }
}
