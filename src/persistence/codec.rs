//! Snapshot encodings.

use serde::{Deserialize, Serialize};

use super::snapshot::GameSnapshot;
use crate::core::{EngineError, EngineResult, SnapshotFault};

/// On-disk encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Human-readable JSON (the default save file format).
    #[default]
    Json,
    /// Compact `bincode`.
    Binary,
}

impl SnapshotFormat {
    /// Serialize a snapshot.
    pub fn encode(self, snapshot: &GameSnapshot) -> EngineResult<Vec<u8>> {
        let bytes = match self {
            SnapshotFormat::Json => {
                serde_json::to_vec_pretty(snapshot).map_err(|err| EngineError::Storage(err.to_string()))?
            }
            SnapshotFormat::Binary => {
                bincode::serialize(snapshot).map_err(|err| EngineError::Storage(err.to_string()))?
            }
        };
        Ok(bytes)
    }

    /// Deserialize and validate a snapshot.
    pub fn decode(self, bytes: &[u8]) -> EngineResult<GameSnapshot> {
        if bytes.is_empty() {
            return Err(SnapshotFault::Empty.into());
        }

        let snapshot: GameSnapshot = match self {
            SnapshotFormat::Json => {
                serde_json::from_slice(bytes).map_err(|err| SnapshotFault::Malformed(err.to_string()))?
            }
            SnapshotFormat::Binary => {
                bincode::deserialize(bytes).map_err(|err| SnapshotFault::Malformed(err.to_string()))?
            }
        };

        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotFormat::Json => f.write_str("json"),
            SnapshotFormat::Binary => f.write_str("binary"),
        }
    }
}
