//! Engine events.
//!
//! Events tell the presentation layer what happened. They carry indices and
//! identities, never references into the grid, so listeners can hold on to
//! them freely.

use serde::{Deserialize, Serialize};

use crate::cards::CardIdentity;
use crate::grid::CardIndex;

/// A card referenced by an event: where it sits and what it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub index: CardIndex,
    pub identity: CardIdentity,
}

impl CardRef {
    #[must_use]
    pub const fn new(index: CardIndex, identity: CardIdentity) -> Self {
        Self { index, identity }
    }
}

/// Something the engine did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A card was flipped face up by the player.
    CardRevealed(CardRef),
    /// A pair was dequeued and its settle delay started.
    EvaluationStarted { first: CardRef, second: CardRef },
    /// The pair matched and was removed.
    MatchFound { first: CardRef, second: CardRef },
    /// The pair did not match and was flipped back.
    NoMatch { first: CardRef, second: CardRef },
    /// Every card is matched. Fires once per session.
    GameFinished,
    ScoreChanged(u32),
    TurnsChanged(u32),
    PowerUpCountChanged(u32),
    /// A hint power-up showed these cards.
    HintStarted { indices: Vec<CardIndex> },
    /// The hint window closed and these cards were hidden again.
    HintEnded { indices: Vec<CardIndex> },
}

impl EngineEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::CardRevealed(_) => "card_revealed",
            EngineEvent::EvaluationStarted { .. } => "evaluation_started",
            EngineEvent::MatchFound { .. } => "match_found",
            EngineEvent::NoMatch { .. } => "no_match",
            EngineEvent::GameFinished => "game_finished",
            EngineEvent::ScoreChanged(_) => "score_changed",
            EngineEvent::TurnsChanged(_) => "turns_changed",
            EngineEvent::PowerUpCountChanged(_) => "power_up_count_changed",
            EngineEvent::HintStarted { .. } => "hint_started",
            EngineEvent::HintEnded { .. } => "hint_ended",
        }
    }
}
