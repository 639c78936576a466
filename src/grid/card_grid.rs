//! `CardGrid` implementation.

use im::Vector;

use crate::cards::{CardEntity, CardIdentity, Orientation};
use crate::core::{EngineError, EngineResult};
use crate::persistence::CardSnapshot;

/// Position of a card on the grid, row-major.
pub type CardIndex = usize;

/// Fixed-size grid of cards.
///
/// Uses an `im` persistent vector so the session can capture the grid for a
/// snapshot in O(1) regardless of size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardGrid {
    rows: usize,
    cols: usize,
    cards: Vector<CardEntity>,
}

impl CardGrid {
    /// Build a fresh grid, every card face down and active.
    pub fn build(rows: usize, cols: usize, identities: Vec<CardIdentity>) -> EngineResult<Self> {
        Self::check_len(rows, cols, identities.len())?;

        Ok(Self {
            rows,
            cols,
            cards: identities.into_iter().map(CardEntity::new).collect(),
        })
    }

    /// Rebuild a grid directly from persisted per-card state.
    ///
    /// Bypasses the reveal/hide protocol; only used when loading a save.
    pub fn restore_from(rows: usize, cols: usize, cards: &[CardSnapshot]) -> EngineResult<Self> {
        Self::check_len(rows, cols, cards.len())?;

        Ok(Self {
            rows,
            cols,
            cards: cards
                .iter()
                .map(|card| CardEntity::with_state(card.identity, card.orientation, !card.matched))
                .collect(),
        })
    }

    fn check_len(rows: usize, cols: usize, len: usize) -> EngineResult<()> {
        if rows.checked_mul(cols) != Some(len) || len == 0 {
            return Err(EngineError::InvalidGridSize { rows, cols, capacity: len });
        }
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cards (always `rows * cols`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card by index.
    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&CardEntity> {
        self.cards.get(index)
    }

    /// Iterate over cards in grid order.
    pub fn iter(&self) -> impl Iterator<Item = &CardEntity> {
        self.cards.iter()
    }

    /// Cards still in play.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.cards.iter().filter(|card| card.active).count()
    }

    /// Indices of active cards showing their face, in grid order.
    #[must_use]
    pub fn face_up_active(&self) -> Vec<CardIndex> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.active && card.is_face_up())
            .map(|(index, _)| index)
            .collect()
    }

    fn card_mut(&mut self, index: CardIndex) -> EngineResult<&mut CardEntity> {
        let len = self.cards.len();
        self.cards
            .get_mut(index)
            .ok_or(EngineError::InvalidCardIndex { index, len })
    }

    /// Flip a face-down active card face up.
    ///
    /// Fails without changing anything if the card is already face up or
    /// has been matched.
    pub fn reveal(&mut self, index: CardIndex) -> EngineResult<&CardEntity> {
        let card = self.card_mut(index)?;
        if !card.is_revealable() {
            return Err(EngineError::AlreadyRevealedOrInactive { index });
        }
        card.orientation = Orientation::FaceUp;
        Ok(&*card)
    }

    /// Flip both cards face down. Safe if either already is.
    pub fn hide_pair(&mut self, first: CardIndex, second: CardIndex) -> EngineResult<()> {
        self.check_index(first)?;
        self.check_index(second)?;
        for index in [first, second] {
            self.set_face_down(index);
        }
        Ok(())
    }

    /// Remove both cards from play. Irreversible.
    pub fn deactivate_pair(&mut self, first: CardIndex, second: CardIndex) -> EngineResult<()> {
        self.check_index(first)?;
        self.check_index(second)?;
        for index in [first, second] {
            if let Some(card) = self.cards.get_mut(index) {
                card.active = false;
                card.hinted = false;
            }
        }
        Ok(())
    }

    /// True once every card has been matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| !card.active)
    }

    /// Show a face-down active card as a hint.
    ///
    /// Returns `false` (and changes nothing) for cards that are face up or
    /// matched.
    pub fn hint_reveal(&mut self, index: CardIndex) -> bool {
        match self.cards.get_mut(index) {
            Some(card) if card.is_revealable() => {
                card.orientation = Orientation::FaceUp;
                card.hinted = true;
                true
            }
            _ => false,
        }
    }

    /// Hide a card shown by `hint_reveal`.
    ///
    /// Cards that stopped being hinted in the meantime are left alone.
    pub fn end_hint(&mut self, index: CardIndex) -> bool {
        let hinted = self.cards.get(index).map_or(false, |card| card.hinted);
        if hinted {
            self.set_face_down(index);
        }
        hinted
    }

    fn set_face_down(&mut self, index: CardIndex) {
        if let Some(card) = self.cards.get_mut(index) {
            card.orientation = Orientation::FaceDown;
            card.hinted = false;
        }
    }

    fn check_index(&self, index: CardIndex) -> EngineResult<()> {
        if index < self.cards.len() {
            Ok(())
        } else {
            Err(EngineError::InvalidCardIndex { index, len: self.cards.len() })
        }
    }
}
