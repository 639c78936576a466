//! Game session: the composition root.
//!
//! A `GameSession` owns everything one game needs: the grid, the reveal
//! evaluator, score and turn trackers, the power-up bag, the virtual clock
//! and the event bus. Presentation code talks to it through `request_*`
//! methods and listens through `subscribe`.
//!
//! ## Time
//!
//! The session never blocks. Settle delays are scheduled on a virtual clock
//! that moves only when the host calls [`GameSession::tick`] (or
//! [`GameSession::run_until_idle`] in headless drivers). Anything due runs
//! before the next reveal is accepted.
//!
//! ```
//! use pair_match::{EngineEvent, GameSession, SessionConfig};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut session = GameSession::new(SessionConfig::new(2, 2).with_seed(7)).unwrap();
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&events);
//! session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
//!
//! session.request_reveal(0).unwrap();
//! session.request_reveal(1).unwrap();
//! assert!(session.is_evaluating());
//!
//! session.tick(400);
//! assert!(!session.is_evaluating());
//! assert_eq!(session.turns(), 1);
//! assert!(matches!(events.borrow()[0], EngineEvent::CardRevealed(_)));
//! ```

mod game_session;

pub use game_session::GameSession;
