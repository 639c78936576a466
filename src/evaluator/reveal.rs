//! `RevealEvaluator` implementation.

use smallvec::SmallVec;

use crate::core::Timings;
use crate::events::CardRef;
use crate::grid::{CardGrid, CardIndex};

/// Classification of a dequeued pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    Match,
    NoMatch,
}

impl PairOutcome {
    /// Settle delay before this outcome is applied.
    #[must_use]
    pub fn settle_ms(self, timings: &Timings) -> u64 {
        match self {
            PairOutcome::Match => timings.match_settle_ms,
            PairOutcome::NoMatch => timings.mismatch_settle_ms,
        }
    }
}

/// A pair waiting for its settle delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluatingPair {
    pub first: CardRef,
    pub second: CardRef,
    pub outcome: PairOutcome,
}

/// What `resolve` applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub pair: EvaluatingPair,
    /// Every card on the grid is now matched.
    pub completed: bool,
}

/// Queues reveals, pairs them, and applies outcomes to the grid.
#[derive(Clone, Debug, Default)]
pub struct RevealEvaluator {
    /// Reveals not yet paired, oldest first.
    pending: SmallVec<[CardIndex; 2]>,

    /// Pair whose settle delay is running.
    in_flight: Option<EvaluatingPair>,

    /// The finished signal has been emitted.
    finished: bool,
}

impl RevealEvaluator {
    /// Create an idle evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pair is awaiting resolution. Reveals must be refused.
    #[must_use]
    pub fn is_evaluating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The pair currently being evaluated.
    #[must_use]
    pub fn in_flight(&self) -> Option<&EvaluatingPair> {
        self.in_flight.as_ref()
    }

    /// Reveals waiting for a partner, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[CardIndex] {
        &self.pending
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Queue a card the grid has just revealed.
    ///
    /// When this completes a pair, the pair is dequeued, classified, marked
    /// in flight and returned. Cards that are not face up and active are
    /// ignored.
    pub fn accept(&mut self, index: CardIndex, grid: &CardGrid) -> Option<EvaluatingPair> {
        match grid.get(index) {
            Some(card) if card.active && card.is_face_up() => self.pending.push(index),
            _ => {
                log::debug!("ignoring reveal of card {} that is not face up", index);
                return None;
            }
        }

        if self.pending.len() < 2 || self.in_flight.is_some() {
            return None;
        }

        let mut drained = self.pending.drain(..2);
        let (first, second) = (drained.next()?, drained.next()?);
        drop(drained);

        let first = CardRef::new(first, grid.get(first)?.identity);
        let second = CardRef::new(second, grid.get(second)?.identity);
        let outcome = if first.identity.matches(&second.identity) {
            PairOutcome::Match
        } else {
            PairOutcome::NoMatch
        };

        let pair = EvaluatingPair { first, second, outcome };
        log::debug!(
            "evaluating {} / {}: {:?}",
            first.identity,
            second.identity,
            outcome
        );
        self.in_flight = Some(pair);
        Some(pair)
    }

    /// Apply the in-flight pair's outcome to the grid.
    ///
    /// A match deactivates both cards; a mismatch flips both face down.
    /// Returns `None` if nothing is in flight.
    pub fn resolve(&mut self, grid: &mut CardGrid) -> Option<Resolution> {
        let pair = self.in_flight.take()?;
        let (a, b) = (pair.first.index, pair.second.index);

        let applied = match pair.outcome {
            PairOutcome::Match => grid.deactivate_pair(a, b),
            PairOutcome::NoMatch => grid.hide_pair(a, b),
        };
        if let Err(err) = applied {
            // Indices came from this grid, so this only happens if the grid
            // was swapped underneath us.
            log::error!("failed to apply {:?} to cards {} and {}: {}", pair.outcome, a, b, err);
        }

        Some(Resolution {
            pair,
            completed: grid.is_complete(),
        })
    }

    /// Record the finished signal. Returns true only the first time.
    pub fn mark_finished(&mut self) -> bool {
        !std::mem::replace(&mut self.finished, true)
    }

    /// Forget all pending and in-flight state (new game or load).
    pub fn reset(&mut self) {
        self.pending.clear();
        self.in_flight = None;
        self.finished = false;
    }
}
