//! `Scheduler` implementation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::grid::CardIndex;

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

impl TaskId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Deferred work the session runs once its delay expires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Apply the in-flight pair's outcome.
    ResolvePair,

    /// Emit the finished signal.
    FinishGame,

    /// Hide cards shown by a hint power-up.
    EndHint { indices: Vec<CardIndex> },
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    id: TaskId,
}

/// Cooperative timer queue on a virtual millisecond clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    /// Min-heap on (due time, scheduling order).
    queue: BinaryHeap<Reverse<Entry>>,
    /// Payloads keyed by task id; ids are dense and increasing.
    tasks: Vec<(TaskId, Continuation)>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of continuations not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest scheduled continuation.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    /// Schedule `continuation` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, continuation: Continuation) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due_ms = self.now_ms.saturating_add(delay_ms);

        log::trace!("scheduling {:?} as {} at t={}ms", continuation, id, due_ms);
        self.queue.push(Reverse(Entry { due_ms, id }));
        self.tasks.push((id, continuation));
        id
    }

    /// Remove and return the earliest continuation due at or before now.
    pub fn pop_due(&mut self) -> Option<Continuation> {
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due_ms <= self.now_ms => {}
            _ => return None,
        }
        let Reverse(entry) = self.queue.pop()?;
        let position = self.tasks.iter().position(|(id, _)| *id == entry.id)?;
        Some(self.tasks.remove(position).1)
    }

    /// Move the clock forward and return every continuation now due, in
    /// firing order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Continuation> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        std::iter::from_fn(|| self.pop_due()).collect()
    }

    /// Jump the clock to the next due time, if anything is scheduled.
    ///
    /// Returns the elapsed milliseconds.
    pub fn skip_to_next(&mut self) -> Option<u64> {
        let Reverse(next) = self.queue.peek()?;
        let elapsed = next.due_ms.saturating_sub(self.now_ms);
        self.now_ms = self.now_ms.max(next.due_ms);
        Some(elapsed)
    }

    /// Drop everything scheduled. The clock keeps its value.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.tasks.clear();
    }
}
