//! Score and turn bookkeeping.
//!
//! Both trackers hold a single non-negative counter and notify their
//! observers synchronously, in subscription order, on every mutation.

mod observers;
mod score;
mod turns;

pub use observers::{ObserverId, Observers};
pub use score::{ScoreTracker, POINTS_PER_MATCH};
pub use turns::TurnTracker;
