//! Save and load.
//!
//! ## Key Types
//!
//! - `GameSnapshot`: score, turns, power-up count and per-card grid state
//! - `SnapshotFormat`: JSON (`serde_json`) or binary (`bincode`) encoding
//! - `SaveSlot`: the single fixed save file
//!
//! Decoding always validates, so a `GameSnapshot` obtained from bytes is safe
//! to restore.

mod codec;
mod snapshot;
mod store;

pub use codec::SnapshotFormat;
pub use snapshot::{CardSnapshot, GameSnapshot, GridSnapshot};
pub use store::SaveSlot;
