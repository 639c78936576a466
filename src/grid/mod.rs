//! Card grid: the ordered, fixed-size collection of cards in play.
//!
//! The grid owns every `CardEntity` of a session and exposes the only
//! primitives that change them: reveal, hide, deactivate and the hint
//! flips used by power-ups. Its length is fixed at `rows * cols` from
//! construction.
//!
//! ## Usage
//!
//! ```
//! use pair_match::cards::{DeckGenerator, Orientation};
//! use pair_match::core::GameRng;
//! use pair_match::grid::CardGrid;
//!
//! let cards = DeckGenerator::standard().deal(2, 2, &mut GameRng::new(1)).unwrap();
//! let mut grid = CardGrid::build(2, 2, cards).unwrap();
//!
//! grid.reveal(0).unwrap();
//! assert_eq!(grid.get(0).unwrap().orientation, Orientation::FaceUp);
//! assert!(grid.reveal(0).is_err());
//! ```

mod card_grid;

pub use card_grid::{CardGrid, CardIndex};
