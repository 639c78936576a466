//! Virtual-clock scheduling of deferred engine work.
//!
//! The engine never sleeps. Settle delays and hint windows are expressed as
//! [`Continuation`]s scheduled on a millisecond clock that only moves when
//! the host calls `advance`. Continuations due at the same instant fire in
//! the order they were scheduled.
//!
//! ```
//! use pair_match::timing::{Continuation, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(400, Continuation::ResolvePair);
//! scheduler.schedule(200, Continuation::FinishGame);
//!
//! assert!(scheduler.advance(100).is_empty());
//! assert_eq!(scheduler.advance(300), vec![Continuation::FinishGame, Continuation::ResolvePair]);
//! assert!(scheduler.is_idle());
//! ```

mod scheduler;

pub use scheduler::{Continuation, Scheduler, TaskId};
