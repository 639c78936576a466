//! Engine error taxonomy.
//!
//! Every rejected operation returns one of these instead of mutating state
//! partially. The variants fall into three groups:
//!
//! - **Session start**: `InvalidGridSize` is fatal and surfaces before any
//!   grid is built.
//! - **Input races**: `InvalidCardIndex`, `AlreadyRevealedOrInactive` and
//!   `AlreadyEvaluating` are safe to log and ignore.
//! - **Boundaries**: `NoPowerUpsAvailable`, `CorruptOrMissingSnapshot`,
//!   `EvaluationInFlight` and `Storage` are reported to the caller, which
//!   decides whether to inform the player or fall back to a fresh game.

use std::fmt;

use crate::grid::CardIndex;

/// Why a snapshot could not be restored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotFault {
    /// No snapshot exists in the save slot.
    Missing,
    /// The blob was empty.
    Empty,
    /// The blob could not be decoded.
    Malformed(String),
    /// Grid dimensions of zero.
    EmptyGrid,
    /// `cards.len()` does not equal `rows * cols`.
    CardCountMismatch { expected: usize, found: usize },
    /// Two cards share an id.
    DuplicateCardId(u32),
    /// A face appears more than twice.
    OverfullFace { suit: String, rank: String },
    /// A face lacks its partner on the grid, or only one copy is matched.
    UnpairedFace { suit: String, rank: String },
    /// More unmatched cards face up than a saved game can hold.
    TooManyFaceUp(usize),
    /// Power-up count above `MAX_POWER_UPS`.
    PowerUpCountOutOfRange { count: u32, max: u32 },
}

impl fmt::Display for SnapshotFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no saved game found"),
            Self::Empty => write!(f, "snapshot is empty"),
            Self::Malformed(reason) => write!(f, "snapshot is malformed: {}", reason),
            Self::EmptyGrid => write!(f, "snapshot grid has zero rows or columns"),
            Self::CardCountMismatch { expected, found } => {
                write!(f, "snapshot has {} cards, grid needs {}", found, expected)
            }
            Self::DuplicateCardId(id) => write!(f, "card id {} appears more than once", id),
            Self::OverfullFace { suit, rank } => {
                write!(f, "face {} of {} appears more than twice", rank, suit)
            }
            Self::UnpairedFace { suit, rank } => {
                write!(f, "face {} of {} cannot be paired", rank, suit)
            }
            Self::TooManyFaceUp(count) => {
                write!(f, "{} unmatched cards are face up, at most one may be", count)
            }
            Self::PowerUpCountOutOfRange { count, max } => {
                write!(f, "power-up count {} exceeds {}", count, max)
            }
        }
    }
}

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Requested cells exceed the deck, are zero, or cannot be paired.
    InvalidGridSize {
        rows: usize,
        cols: usize,
        capacity: usize,
    },
    /// Index outside the grid.
    InvalidCardIndex { index: CardIndex, len: usize },
    /// Target card is already face up or has been matched.
    AlreadyRevealedOrInactive { index: CardIndex },
    /// A pair is being classified; new reveals are refused until it settles.
    AlreadyEvaluating,
    /// Negative score delta.
    InvalidAmount { amount: i64 },
    /// The power-up bag is empty.
    NoPowerUpsAvailable,
    /// The snapshot could not be loaded.
    CorruptOrMissingSnapshot(SnapshotFault),
    /// Save requested while a continuation is still scheduled.
    EvaluationInFlight,
    /// The save slot could not be written.
    Storage(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridSize { rows, cols, capacity } => write!(
                f,
                "invalid grid size {}x{} (deck capacity {}, cell count must be even and non-zero)",
                rows, cols, capacity
            ),
            Self::InvalidCardIndex { index, len } => {
                write!(f, "card index {} out of range for grid of {}", index, len)
            }
            Self::AlreadyRevealedOrInactive { index } => {
                write!(f, "card {} is already revealed or matched", index)
            }
            Self::AlreadyEvaluating => write!(f, "a pair is already being evaluated"),
            Self::InvalidAmount { amount } => write!(f, "invalid score amount {}", amount),
            Self::NoPowerUpsAvailable => write!(f, "no power-ups available"),
            Self::CorruptOrMissingSnapshot(fault) => write!(f, "cannot load game: {}", fault),
            Self::EvaluationInFlight => write!(f, "cannot save while an evaluation is in flight"),
            Self::Storage(reason) => write!(f, "save slot error: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<SnapshotFault> for EngineError {
    fn from(fault: SnapshotFault) -> Self {
        Self::CorruptOrMissingSnapshot(fault)
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Input races the presentation layer may safely ignore.
    #[must_use]
    pub fn is_ignorable_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidCardIndex { .. } | Self::AlreadyRevealedOrInactive { .. } | Self::AlreadyEvaluating
        )
    }
}
