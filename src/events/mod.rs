//! Engine → presentation notifications.
//!
//! The engine never calls into presentation code directly. It publishes an
//! [`EngineEvent`] on an [`EventBus`]; animation, audio and HUD code subscribe
//! and react.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use pair_match::events::{EngineEvent, EventBus};
//!
//! let mut bus = EventBus::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
//!
//! bus.publish(&EngineEvent::TurnsChanged(1));
//! assert_eq!(seen.borrow().as_slice(), &[EngineEvent::TurnsChanged(1)]);
//! ```

mod bus;
mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::{CardRef, EngineEvent};
