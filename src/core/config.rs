//! Session configuration.
//!
//! A session is configured once at startup with:
//! - Grid dimensions (`rows`, `cols`), or a `GridPreset` from the menu
//! - Whether to resume the saved game
//! - Settle delays (`Timings`) and the power-up allowance
//! - Where the single save slot lives and how it is encoded
//!
//! Configs deserialize from JSON with every field optional:
//!
//! ```
//! use pair_match::core::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{ "rows": 3, "cols": 4, "seed": 7 }"#).unwrap();
//! assert_eq!(config.cell_count(), 12);
//! assert_eq!(config.power_ups, 3);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence::SnapshotFormat;

/// Default save slot file name.
pub const DEFAULT_SAVE_PATH: &str = "SaveGameData.json";

/// Power-ups granted to a fresh game.
pub const DEFAULT_POWER_UPS: u32 = 3;

/// Settle delays, in milliseconds of session time.
///
/// These are the windows during which the second card stays visible before
/// it is removed or flipped back, and during which new reveals are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Pause before a matched pair is removed.
    pub match_settle_ms: u64,
    /// Pause before a mismatched pair flips back.
    pub mismatch_settle_ms: u64,
    /// Pause between the final match and the finished signal.
    pub finish_settle_ms: u64,
    /// How long hint-revealed cards stay face up.
    pub hint_window_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            match_settle_ms: 200,
            mismatch_settle_ms: 400,
            finish_settle_ms: 200,
            hint_window_ms: 1000,
        }
    }
}

impl Timings {
    /// All delays zero. Useful for tests and headless replays.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            match_settle_ms: 0,
            mismatch_settle_ms: 0,
            finish_settle_ms: 0,
            hint_window_ms: 0,
        }
    }
}

/// Grid sizes offered by the start menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridPreset {
    TwoByTwo,
    TwoByThree,
    ThreeByFour,
    ThreeBySix,
    FourByFour,
    FourBySix,
}

impl GridPreset {
    /// All presets in menu order.
    pub const ALL: [GridPreset; 6] = [
        GridPreset::TwoByTwo,
        GridPreset::TwoByThree,
        GridPreset::ThreeByFour,
        GridPreset::ThreeBySix,
        GridPreset::FourByFour,
        GridPreset::FourBySix,
    ];

    /// `(rows, cols)` for this preset.
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            GridPreset::TwoByTwo => (2, 2),
            GridPreset::TwoByThree => (2, 3),
            GridPreset::ThreeByFour => (3, 4),
            GridPreset::ThreeBySix => (3, 6),
            GridPreset::FourByFour => (4, 4),
            GridPreset::FourBySix => (4, 6),
        }
    }

    /// Preset for a dropdown index, `None` if out of range.
    #[must_use]
    pub fn from_menu_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid rows.
    pub rows: usize,

    /// Grid columns.
    pub cols: usize,

    /// Resume from the save slot instead of dealing a fresh game.
    pub load_saved_game: bool,

    /// Deal seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Power-ups in the bag of a fresh game.
    pub power_ups: u32,

    /// Settle delays.
    pub timings: Timings,

    /// Save slot location.
    pub save_path: PathBuf,

    /// Save slot encoding.
    pub snapshot_format: SnapshotFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            load_saved_game: false,
            seed: None,
            power_ups: DEFAULT_POWER_UPS,
            timings: Timings::default(),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            snapshot_format: SnapshotFormat::Json,
        }
    }
}

impl SessionConfig {
    /// Create a configuration for a `rows x cols` grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Create a configuration from a menu preset.
    #[must_use]
    pub fn from_preset(preset: GridPreset) -> Self {
        let (rows, cols) = preset.dimensions();
        Self::new(rows, cols)
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of cells on the grid, saturating at `usize::MAX`.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Resume the saved game at startup.
    #[must_use]
    pub fn with_load_saved_game(mut self, load: bool) -> Self {
        self.load_saved_game = load;
        self
    }

    /// Fix the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting power-up allowance.
    #[must_use]
    pub fn with_power_ups(mut self, count: u32) -> Self {
        self.power_ups = count;
        self
    }

    /// Set the settle delays.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the save slot location.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Set the save slot encoding.
    #[must_use]
    pub fn with_snapshot_format(mut self, format: SnapshotFormat) -> Self {
        self.snapshot_format = format;
        self
    }
}
