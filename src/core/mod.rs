//! Core engine types: RNG, configuration, errors.
//!
//! These are shared by every other module and carry no gameplay rules.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GridPreset, SessionConfig, Timings, DEFAULT_POWER_UPS, DEFAULT_SAVE_PATH};
pub use error::{EngineError, EngineResult, SnapshotFault};
pub use rng::GameRng;
