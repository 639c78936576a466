//! Card system: identities, entities and deck generation.
//!
//! ## Key Types
//!
//! - `CardIdentity`: Immutable `(id, suit, rank)`; pairs share a face
//! - `CardEntity`: Runtime card state (orientation, active)
//! - `DeckGenerator`: Builds the paired deck and deals shuffled layouts

pub mod deck;
pub mod entity;
pub mod identity;

pub use deck::{Catalog, DeckGenerator, COPIES_PER_FACE};
pub use entity::{CardEntity, Orientation};
pub use identity::{CardId, CardIdentity, Rank, Suit};
