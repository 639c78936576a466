//! The single save slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::codec::SnapshotFormat;
use super::snapshot::GameSnapshot;
use crate::core::{EngineError, EngineResult, SnapshotFault};

/// A fixed file location holding at most one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSlot {
    path: PathBuf,
    format: SnapshotFormat,
}

impl SaveSlot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overwrite the slot.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write leaves the previous save intact.
    pub fn write(&self, snapshot: &GameSnapshot) -> EngineResult<()> {
        let bytes = self.format.encode(snapshot)?;
        let tmp = self.tmp_path();

        fs::write(&tmp, &bytes).map_err(|err| storage_error(&tmp, &err))?;
        fs::rename(&tmp, &self.path).map_err(|err| storage_error(&self.path, &err))?;

        log::info!("saved game to {} ({} bytes, {})", self.path.display(), bytes.len(), self.format);
        Ok(())
    }

    /// Read and validate the slot's snapshot.
    pub fn read(&self) -> EngineResult<GameSnapshot> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotFault::Missing.into());
            }
            Err(err) => return Err(SnapshotFault::Malformed(err.to_string()).into()),
        };
        self.format.decode(&bytes)
    }

    /// Delete the slot. A missing slot is not an error.
    pub fn clear(&self) -> EngineResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(&self.path, &err)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(path: &Path, err: &io::Error) -> EngineError {
    EngineError::Storage(format!("{}: {}", path.display(), err))
}
