//! Power-ups: single-use abilities drawn from a bag.

mod power_up;
mod registry;

pub use power_up::{PowerUp, PowerUpEffect, RevealAllHidden};
pub use registry::{PowerUpRegistry, MAX_POWER_UPS};
