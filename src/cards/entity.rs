//! Card entities - runtime card state.
//!
//! `CardEntity` is the mutable holder for one card on the grid: its identity,
//! which face is showing, and whether it is still in play. Entities are owned
//! by `CardGrid`; nothing else mutates them.

use serde::{Deserialize, Serialize};

use super::identity::CardIdentity;

/// Which side of the card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    FaceUp,
    #[default]
    FaceDown,
}

impl Orientation {
    /// The other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::FaceUp => Orientation::FaceDown,
            Orientation::FaceDown => Orientation::FaceUp,
        }
    }
}

/// A card on the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardEntity {
    /// Immutable identity.
    pub identity: CardIdentity,

    /// Face currently showing.
    pub orientation: Orientation,

    /// `false` once matched and removed from play.
    pub active: bool,

    /// Face up only because of a hint power-up. Never persisted.
    pub hinted: bool,
}

impl CardEntity {
    /// Create a fresh face-down, active card.
    #[must_use]
    pub fn new(identity: CardIdentity) -> Self {
        Self {
            identity,
            orientation: Orientation::FaceDown,
            active: true,
            hinted: false,
        }
    }

    /// Create a card in an explicit state (used when restoring saves).
    #[must_use]
    pub fn with_state(identity: CardIdentity, orientation: Orientation, active: bool) -> Self {
        Self {
            identity,
            orientation,
            active,
            hinted: false,
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.orientation == Orientation::FaceUp
    }

    /// Matched and removed from play.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        !self.active
    }

    /// Can this card be revealed by the player?
    #[must_use]
    pub fn is_revealable(&self) -> bool {
        self.active && self.orientation == Orientation::FaceDown
    }

    /// Orientation to persist: hint reveals are transient and save face-down.
    #[must_use]
    pub fn resting_orientation(&self) -> Orientation {
        if self.hinted {
            Orientation::FaceDown
        } else {
            self.orientation
        }
    }
}
