//! Score accumulator.

use super::observers::{ObserverId, Observers};
use crate::core::{EngineError, EngineResult};

/// Points awarded per matched pair.
pub const POINTS_PER_MATCH: i64 = 1;

/// Non-negative score with change notification.
#[derive(Debug, Default)]
pub struct ScoreTracker {
    score: u32,
    observers: Observers<u32>,
}

impl ScoreTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Register an observer called with the new score on every change.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(u32) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add to the score.
    ///
    /// Negative amounts are a programming error and fail with
    /// `InvalidAmount` without touching the score.
    pub fn add_score(&mut self, amount: i64) -> EngineResult<u32> {
        let delta = u32::try_from(amount).map_err(|_| {
            log::error!("rejected score delta {}", amount);
            EngineError::InvalidAmount { amount }
        })?;

        self.score = self.score.saturating_add(delta);
        log::debug!("score {}", self.score);
        self.observers.notify(self.score);
        Ok(self.score)
    }

    /// Overwrite the score (used when resuming a saved game).
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.observers.notify(self.score);
    }
}
