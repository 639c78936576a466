//! Power-up bag.
//!
//! The bag is ordered. Activation always consumes the head entry and removes
//! it permanently; the count is the only state visible outside the engine
//! and the only state persisted.

use std::collections::VecDeque;

use super::power_up::{PowerUp, PowerUpEffect, RevealAllHidden};
use crate::core::{EngineError, EngineResult};
use crate::grid::CardGrid;

/// Largest bag a session holds. Larger requests are clamped.
pub const MAX_POWER_UPS: u32 = 999;

/// Ordered collection of single-use power-ups.
#[derive(Debug, Default)]
pub struct PowerUpRegistry {
    bag: VecDeque<Box<dyn PowerUp>>,
}

impl PowerUpRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bag of `count` reveal-all power-ups, as granted to a new game and
    /// rebuilt from a save's power-up count.
    ///
    /// `count` is clamped to `MAX_POWER_UPS`.
    #[must_use]
    pub fn with_reveal_all(count: u32) -> Self {
        if count > MAX_POWER_UPS {
            log::warn!("power-up count {} clamped to {}", count, MAX_POWER_UPS);
        }
        let mut registry = Self::new();
        for _ in 0..count.min(MAX_POWER_UPS) {
            registry.push(Box::new(RevealAllHidden));
        }
        registry
    }

    /// Append a power-up to the tail of the bag.
    pub fn push(&mut self, power_up: Box<dyn PowerUp>) {
        self.bag.push_back(power_up);
    }

    /// Remaining power-ups.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::try_from(self.bag.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bag.is_empty()
    }

    /// Name of the power-up the next activation would use.
    #[must_use]
    pub fn peek_name(&self) -> Option<&str> {
        self.bag.front().map(|power_up| power_up.name())
    }

    /// Remove the head power-up and apply it to the grid.
    pub fn activate(&mut self, grid: &mut CardGrid) -> EngineResult<PowerUpEffect> {
        let power_up = self.bag.pop_front().ok_or(EngineError::NoPowerUpsAvailable)?;
        log::info!("activating power-up '{}' ({} left)", power_up.name(), self.bag.len());
        Ok(power_up.activate(grid))
    }
}
