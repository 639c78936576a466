//! Deck generation and dealing.
//!
//! A deck holds exactly two cards of every `(suit, rank)` face in the
//! catalog, with ids assigned in generation order. Dealing takes the first
//! `rows * cols` cards of the ordered deck and shuffles them, so every face
//! on the grid appears exactly twice.

use rustc_hash::FxHashSet;

use super::identity::{CardId, CardIdentity, Rank, Suit};
use crate::core::{EngineError, EngineResult, GameRng};

/// Copies of each face in a deck.
pub const COPIES_PER_FACE: usize = 2;

/// The suits and ranks a deck is built from. Neither list repeats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    suits: Vec<Suit>,
    ranks: Vec<Rank>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Four suits by thirteen ranks.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            suits: Suit::ALL.to_vec(),
            ranks: Rank::ALL.to_vec(),
        }
    }

    /// Create a catalog from explicit suits and ranks.
    ///
    /// Repeats are dropped, keeping first occurrences in order.
    #[must_use]
    pub fn new(suits: Vec<Suit>, ranks: Vec<Rank>) -> Self {
        Self {
            suits: dedup(suits),
            ranks: dedup(ranks),
        }
    }

    #[must_use]
    pub fn suits(&self) -> &[Suit] {
        &self.suits
    }

    #[must_use]
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Cards in a full deck.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.suits.len() * self.ranks.len() * COPIES_PER_FACE
    }
}

fn dedup<T: Copy + Eq + std::hash::Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// Builds and deals decks from a catalog.
#[derive(Clone, Debug, Default)]
pub struct DeckGenerator {
    catalog: Catalog,
}

impl DeckGenerator {
    /// Create a generator over a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Generator over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cards in a full deck.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.catalog.capacity()
    }

    /// The full ordered deck: for each suit, for each rank, two copies.
    ///
    /// Ids run `0..capacity` in generation order.
    #[must_use]
    pub fn full_deck(&self) -> Vec<CardIdentity> {
        let mut deck = Vec::with_capacity(self.capacity());
        let mut next_id = 0u32;

        for &suit in &self.catalog.suits {
            for &rank in &self.catalog.ranks {
                for _ in 0..COPIES_PER_FACE {
                    deck.push(CardIdentity::new(CardId::new(next_id), suit, rank));
                    next_id += 1;
                }
            }
        }

        deck
    }

    /// Check that a `rows x cols` grid can be dealt from this deck.
    ///
    /// The cell count must be non-zero, even, and fit in the deck.
    pub fn check_grid_size(&self, rows: usize, cols: usize) -> EngineResult<usize> {
        let capacity = self.capacity();
        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells > 0 && cells % COPIES_PER_FACE == 0 && cells <= capacity);

        cells.ok_or(EngineError::InvalidGridSize { rows, cols, capacity })
    }

    /// Deal a shuffled `rows x cols` layout.
    ///
    /// Fails with `InvalidGridSize` before generating anything if the grid
    /// cannot be dealt.
    pub fn deal(&self, rows: usize, cols: usize, rng: &mut GameRng) -> EngineResult<Vec<CardIdentity>> {
        let cells = self.check_grid_size(rows, cols)?;

        let mut cards = self.full_deck();
        cards.truncate(cells);
        rng.shuffle(&mut cards);

        log::debug!("dealt {} cards for {}x{} grid", cells, rows, cols);
        Ok(cards)
    }
}
