//! Reveal evaluation: the match/no-match state machine.
//!
//! ## States
//!
//! - **Idle**: zero or one reveal pending.
//! - **Evaluating**: a pair has been dequeued and classified; its outcome
//!   is applied when the settle delay expires.
//!
//! Every accepted reveal is queued. As soon as two are queued, the two oldest
//! are dequeued as a pair (strict arrival order) and classified. While a pair
//! is in flight the session refuses new reveals, so the queue never holds
//! more than one card outside of `accept`.
//!
//! ```
//! use pair_match::cards::{CardId, CardIdentity, Rank, Suit};
//! use pair_match::evaluator::{PairOutcome, RevealEvaluator};
//! use pair_match::grid::CardGrid;
//!
//! let mut grid = CardGrid::build(1, 2, vec![
//!     CardIdentity::new(CardId(0), Suit::Hearts, Rank::King),
//!     CardIdentity::new(CardId(1), Suit::Hearts, Rank::King),
//! ]).unwrap();
//! let mut evaluator = RevealEvaluator::new();
//!
//! grid.reveal(0).unwrap();
//! assert!(evaluator.accept(0, &grid).is_none());
//! grid.reveal(1).unwrap();
//! let pair = evaluator.accept(1, &grid).unwrap();
//! assert_eq!(pair.outcome, PairOutcome::Match);
//!
//! let resolution = evaluator.resolve(&mut grid).unwrap();
//! assert!(resolution.completed);
//! ```

mod reveal;

pub use reveal::{EvaluatingPair, PairOutcome, Resolution, RevealEvaluator};
