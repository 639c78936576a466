//! Power-up abilities.

use std::fmt;

use crate::grid::{CardGrid, CardIndex};

/// What activating a power-up did to the grid.
///
/// The session turns effects into scheduled follow-ups (e.g. hiding hinted
/// cards once the hint window closes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PowerUpEffect {
    /// These cards were flipped face up as a hint and must be hidden later.
    Hint { indices: Vec<CardIndex> },
}

/// A single-use ability.
pub trait PowerUp: fmt::Debug {
    /// Display name.
    fn name(&self) -> &str;

    /// Apply the ability to the grid.
    fn activate(&self, grid: &mut CardGrid) -> PowerUpEffect;
}

/// Shows every hidden card still in play for a short window.
///
/// Cards already face up (a pending reveal) and matched cards are left
/// alone. Hinted cards bypass the reveal queue, so the hint never counts as
/// a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealAllHidden;

impl PowerUp for RevealAllHidden {
    fn name(&self) -> &str {
        "Reveal All Cards"
    }

    fn activate(&self, grid: &mut CardGrid) -> PowerUpEffect {
        let indices = (0..grid.len()).filter(|&index| grid.hint_reveal(index)).collect();
        PowerUpEffect::Hint { indices }
    }
}
