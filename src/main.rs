//! Headless driver.
//!
//! Plays a game with a memory-perfect autoplayer, optionally resuming from
//! and saving to the save slot, and prints a summary.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rustc_hash::FxHashMap;

use pair_match::{
    CardIdentity, CardIndex, EngineEvent, GameRng, GameSession, GridPreset, SessionConfig, SnapshotFormat,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a match-pair game headlessly", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Menu preset: 0=2x2 1=2x3 2=3x4 3=3x6 4=4x4 5=4x6
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    preset: Option<usize>,

    /// Seed for the deal and the autoplayer
    #[arg(long)]
    seed: Option<u64>,

    /// Resume from the save slot
    #[arg(long)]
    load: bool,

    /// Save and stop once this many turns have been played
    #[arg(long, value_name = "TURNS")]
    save_after: Option<u32>,

    /// Save slot path
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Save slot encoding
    #[arg(long, value_parser = ["json", "binary"])]
    format: Option<String>,

    /// Power-ups granted to a new game
    #[arg(long)]
    power_ups: Option<u32>,

    /// Power-ups the autoplayer spends before its first reveal
    #[arg(long, default_value_t = 0)]
    hints: u32,

    /// JSON session config; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every engine event
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                SessionConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => SessionConfig::default(),
        };

        if let Some(index) = self.preset {
            let Some(preset) = GridPreset::from_menu_index(index) else {
                bail!("unknown preset {} (expected 0..{})", index, GridPreset::ALL.len());
            };
            let (rows, cols) = preset.dimensions();
            config.rows = rows;
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(count) = self.power_ups {
            config = config.with_power_ups(count);
        }
        if let Some(path) = &self.save_path {
            config = config.with_save_path(path.clone());
        }
        if let Some(format) = self.format.as_deref() {
            let format = match format {
                "binary" => SnapshotFormat::Binary,
                _ => SnapshotFormat::Json,
            };
            config = config.with_snapshot_format(format);
        }
        Ok(config.with_load_saved_game(self.load))
    }
}

/// Remembers every face it has seen and never forgets.
struct Autoplayer {
    rng: GameRng,
    memory: FxHashMap<CardIndex, CardIdentity>,
}

impl Autoplayer {
    fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            memory: FxHashMap::default(),
        }
    }

    /// Memorize every face currently showing.
    fn observe(&mut self, session: &GameSession) {
        for (index, card) in session.grid().iter().enumerate() {
            if card.active && card.is_face_up() {
                self.memory.insert(index, card.identity);
            }
        }
    }

    fn revealable(session: &GameSession) -> Vec<CardIndex> {
        (0..session.grid().len())
            .filter(|&index| session.grid().get(index).map_or(false, |card| card.is_revealable()))
            .collect()
    }

    fn known_partner(&self, session: &GameSession, index: CardIndex) -> Option<CardIndex> {
        let identity = self.memory.get(&index)?;
        Self::revealable(session)
            .into_iter()
            .find(|other| self.memory.get(other).map_or(false, |seen| identity.matches(seen)))
    }

    fn pick_unknown(&mut self, session: &GameSession, except: Option<CardIndex>) -> Option<CardIndex> {
        let candidates: Vec<_> = Self::revealable(session)
            .into_iter()
            .filter(|index| Some(*index) != except && !self.memory.contains_key(index))
            .collect();
        if candidates.is_empty() {
            return Self::revealable(session).into_iter().find(|index| Some(*index) != except);
        }
        Some(candidates[self.rng.gen_range_usize(0..candidates.len())])
    }

    fn pick_first(&mut self, session: &GameSession) -> Option<CardIndex> {
        let known_pair = Self::revealable(session)
            .into_iter()
            .find(|&index| self.known_partner(session, index).is_some());
        known_pair.or_else(|| self.pick_unknown(session, None))
    }

    /// Play one turn: reveal up to two cards and let the pair settle.
    fn play_turn(&mut self, session: &mut GameSession) -> Result<()> {
        let first = match session.pending_reveals().first() {
            Some(&index) => index,
            None => {
                let Some(index) = self.pick_first(session) else {
                    bail!("no revealable card left on an unfinished grid");
                };
                session.request_reveal(index)?;
                index
            }
        };
        self.observe(session);

        let second = match self.known_partner(session, first) {
            Some(index) => Some(index),
            None => self.pick_unknown(session, Some(first)),
        };
        if let Some(second) = second {
            session.request_reveal(second)?;
            self.observe(session);
        }
        session.run_until_idle();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.session_config()?;

    let mut session = GameSession::start(config).context("starting session")?;
    if args.verbose {
        session.subscribe(|event: &EngineEvent| println!("{:>20}  {:?}", event.name(), event));
    }

    let mut player = Autoplayer::new(session.seed() ^ 0x5eed);
    player.observe(&session);

    for _ in 0..args.hints {
        if session.request_activate_power_up().is_err() {
            break;
        }
        player.observe(&session);
        session.run_until_idle();
    }

    // A resumed, already-complete game only needs its finish signal
    session.run_until_idle();
    while !session.is_finished() {
        if args.save_after.map_or(false, |limit| session.turns() >= limit) {
            session.request_save().context("saving game")?;
            println!("saved to {}", session.config().save_path.display());
            break;
        }
        player.play_turn(&mut session)?;
    }

    println!(
        "{}x{} grid{}: score {}, turns {}, power-ups left {}, {} ms{}",
        session.config().rows,
        session.config().cols,
        if session.is_resumed() { " (resumed)" } else { "" },
        session.score(),
        session.turns(),
        session.power_up_count(),
        session.now_ms(),
        if session.is_finished() { ", finished" } else { "" },
    );
    Ok(())
}
