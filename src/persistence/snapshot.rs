//! Persisted form of a session.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::{CardIdentity, Orientation, COPIES_PER_FACE};
use crate::core::SnapshotFault;
use crate::grid::CardGrid;
use crate::powerups::MAX_POWER_UPS;

/// Persisted state of one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub identity: CardIdentity,
    pub matched: bool,
    pub orientation: Orientation,
}

impl CardSnapshot {
    #[must_use]
    pub const fn new(identity: CardIdentity, matched: bool, orientation: Orientation) -> Self {
        Self { identity, matched, orientation }
    }
}

/// Persisted grid layout, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cards: Vec<CardSnapshot>,
}

/// Everything needed to resume a session.
///
/// Serialized field names follow the save file format (`powerUpCount`).
/// In-flight evaluations and hint windows are never part of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub score: u32,
    pub turns: u32,
    pub power_up_count: u32,
    pub grid: GridSnapshot,
}

impl GameSnapshot {
    /// Capture the persistable state of a session.
    ///
    /// Hinted cards are recorded face down.
    #[must_use]
    pub fn capture(grid: &CardGrid, score: u32, turns: u32, power_up_count: u32) -> Self {
        let cards = grid
            .iter()
            .map(|card| CardSnapshot::new(card.identity, card.is_matched(), card.resting_orientation()))
            .collect();

        Self {
            score,
            turns,
            power_up_count,
            grid: GridSnapshot {
                rows: grid.rows(),
                cols: grid.cols(),
                cards,
            },
        }
    }

    /// Check the invariants a restorable snapshot must hold.
    ///
    /// Beyond the grid shape, every face must appear exactly twice with both
    /// copies matched or both unmatched, and at most one unmatched card may be
    /// face up. Anything else could never be played to completion.
    pub fn validate(&self) -> Result<(), SnapshotFault> {
        if self.power_up_count > MAX_POWER_UPS {
            return Err(SnapshotFault::PowerUpCountOutOfRange {
                count: self.power_up_count,
                max: MAX_POWER_UPS,
            });
        }

        let GridSnapshot { rows, cols, cards } = &self.grid;
        if *rows == 0 || *cols == 0 {
            return Err(SnapshotFault::EmptyGrid);
        }

        let expected = rows.checked_mul(*cols).ok_or(SnapshotFault::EmptyGrid)?;
        if cards.len() != expected {
            return Err(SnapshotFault::CardCountMismatch {
                expected,
                found: cards.len(),
            });
        }

        let mut ids = FxHashSet::default();
        // face -> (copies, unmatched copies), in first-seen order for reporting
        let mut faces: FxHashMap<_, (usize, usize)> = FxHashMap::default();
        let mut order = Vec::new();
        for card in cards {
            let identity = card.identity;
            if !ids.insert(identity.id) {
                return Err(SnapshotFault::DuplicateCardId(identity.id.raw()));
            }

            let counts = faces.entry(identity.face()).or_insert_with(|| {
                order.push(identity);
                (0, 0)
            });
            counts.0 += 1;
            if !card.matched {
                counts.1 += 1;
            }
            if counts.0 > COPIES_PER_FACE {
                return Err(SnapshotFault::OverfullFace {
                    suit: identity.suit.to_string(),
                    rank: identity.rank.to_string(),
                });
            }
        }

        for identity in order {
            let (copies, unmatched) = faces[&identity.face()];
            if copies != COPIES_PER_FACE || (unmatched != 0 && unmatched != COPIES_PER_FACE) {
                return Err(SnapshotFault::UnpairedFace {
                    suit: identity.suit.to_string(),
                    rank: identity.rank.to_string(),
                });
            }
        }

        let face_up = self.face_up_unmatched().len();
        if face_up > 1 {
            return Err(SnapshotFault::TooManyFaceUp(face_up));
        }

        Ok(())
    }

    /// Indices of unmatched face-up cards, in grid order.
    #[must_use]
    pub fn face_up_unmatched(&self) -> Vec<usize> {
        self.grid
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.matched && card.orientation == Orientation::FaceUp)
            .map(|(index, _)| index)
            .collect()
    }
}
