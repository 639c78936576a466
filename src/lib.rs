//! # pair-match
//!
//! A match-pair ("memory") card game engine.
//!
//! Cards are dealt face down onto a grid. The player reveals two at a time;
//! a pair with the same suit and rank is removed and scores a point, anything
//! else is flipped back. The game ends when every card is matched.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine knows nothing about rendering or input
//!    devices. Presentation code sends requests and listens for events.
//!
//! 2. **Deterministic**: Deals come from a seeded ChaCha RNG and time is a
//!    virtual clock, so a seed plus a list of requests replays a game
//!    exactly.
//!
//! 3. **Never Partially Fail**: Rejected requests return an `EngineError`
//!    and leave the grid, score and turns untouched.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Card identities, entities and deck generation
//! - `grid`: The card grid and its reveal/hide/deactivate primitives
//! - `evaluator`: Pairing of reveals and match classification
//! - `tracking`: Score and turn counters with observers
//! - `powerups`: Single-use abilities
//! - `timing`: Virtual-clock scheduler for settle delays
//! - `persistence`: Snapshots, encodings and the save slot
//! - `events`: Events emitted to the presentation layer
//! - `session`: `GameSession`, which wires everything together

pub mod core;
pub mod cards;
pub mod grid;
pub mod evaluator;
pub mod tracking;
pub mod powerups;
pub mod timing;
pub mod persistence;
pub mod events;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameRng,
    EngineError, EngineResult, SnapshotFault,
    SessionConfig, GridPreset, Timings,
};

pub use crate::cards::{CardId, CardIdentity, Suit, Rank, CardEntity, Orientation, DeckGenerator};

pub use crate::grid::{CardGrid, CardIndex};

pub use crate::evaluator::{RevealEvaluator, PairOutcome};

pub use crate::tracking::{ScoreTracker, TurnTracker};

pub use crate::powerups::{PowerUp, PowerUpEffect, PowerUpRegistry};

pub use crate::timing::{Continuation, Scheduler};

pub use crate::persistence::{GameSnapshot, SnapshotFormat, SaveSlot};

pub use crate::events::{CardRef, EngineEvent, SubscriptionId};

pub use crate::session::GameSession;
