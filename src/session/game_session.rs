//! `GameSession` implementation.

use crate::cards::DeckGenerator;
use crate::core::{EngineError, EngineResult, GameRng, SessionConfig};
use crate::evaluator::{PairOutcome, RevealEvaluator};
use crate::events::{CardRef, EngineEvent, EventBus, SubscriptionId};
use crate::grid::{CardGrid, CardIndex};
use crate::persistence::{GameSnapshot, SaveSlot};
use crate::powerups::{PowerUpEffect, PowerUpRegistry};
use crate::timing::{Continuation, Scheduler};
use crate::tracking::{ObserverId, ScoreTracker, TurnTracker, POINTS_PER_MATCH};

/// One game of match-pairs.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    generator: DeckGenerator,
    rng: GameRng,
    grid: CardGrid,
    evaluator: RevealEvaluator,
    score: ScoreTracker,
    turns: TurnTracker,
    registry: PowerUpRegistry,
    scheduler: Scheduler,
    bus: EventBus,
    /// State came from a save rather than a fresh deal.
    resumed: bool,
}

impl GameSession {
    /// Start a fresh game: validate the grid size and deal a shuffled deck.
    pub fn new(config: SessionConfig) -> EngineResult<Self> {
        let generator = DeckGenerator::standard();
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let identities = generator.deal(config.rows, config.cols, &mut rng)?;
        let grid = CardGrid::build(config.rows, config.cols, identities)?;

        log::info!(
            "new {}x{} game (seed {}, {} power-ups)",
            config.rows,
            config.cols,
            rng.seed(),
            config.power_ups
        );
        Ok(Self::assemble(config, generator, rng, grid))
    }

    fn assemble(config: SessionConfig, generator: DeckGenerator, rng: GameRng, grid: CardGrid) -> Self {
        Self {
            registry: PowerUpRegistry::with_reveal_all(config.power_ups),
            config,
            generator,
            rng,
            grid,
            evaluator: RevealEvaluator::new(),
            score: ScoreTracker::new(),
            turns: TurnTracker::new(),
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
            resumed: false,
        }
    }

    /// Start a session, resuming the saved game if `config.load_saved_game`.
    ///
    /// A missing or corrupt save falls back to a fresh game. Other errors
    /// (e.g. an invalid grid size for the fresh game) are returned.
    pub fn start(config: SessionConfig) -> EngineResult<Self> {
        if !config.load_saved_game {
            return Self::new(config);
        }

        let slot = SaveSlot::new(config.save_path.clone(), config.snapshot_format);
        match slot.read() {
            Ok(snapshot) => {
                let grid = CardGrid::restore_from(snapshot.grid.rows, snapshot.grid.cols, &snapshot.grid.cards)?;
                let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
                let mut session = Self::assemble(config, DeckGenerator::standard(), rng, grid);
                session.restore(&snapshot)?;
                Ok(session)
            }
            Err(EngineError::CorruptOrMissingSnapshot(fault)) => {
                log::warn!("cannot resume from {}: {}; starting a new game", slot.path().display(), fault);
                Self::new(config)
            }
            Err(err) => Err(err),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns.turns()
    }

    #[must_use]
    pub fn power_up_count(&self) -> u32 {
        self.registry.count()
    }

    /// The finished signal has fired.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.evaluator.is_finished()
    }

    /// A pair is awaiting its settle delay; reveals are refused.
    #[must_use]
    pub fn is_evaluating(&self) -> bool {
        self.evaluator.is_evaluating()
    }

    /// Nothing is scheduled on the clock.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    #[must_use]
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Seed of the deal, for reproducing a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Reveals waiting for a partner.
    #[must_use]
    pub fn pending_reveals(&self) -> &[CardIndex] {
        self.evaluator.pending()
    }

    // === Listeners ===

    /// Receive every engine event, in emission order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Observe the score value directly.
    pub fn subscribe_score<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(u32) + 'static,
    {
        self.score.subscribe(observer)
    }

    /// Observe the turn count directly.
    pub fn subscribe_turns<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(u32) + 'static,
    {
        self.turns.subscribe(observer)
    }

    // === Requests ===

    /// Reveal a card.
    ///
    /// Due continuations run first. Fails without side effects while a pair
    /// is evaluating, or if the card is out of range, face up or matched.
    pub fn request_reveal(&mut self, index: CardIndex) -> EngineResult<()> {
        self.run_due();

        if self.evaluator.is_evaluating() {
            log::debug!("reveal of card {} refused: pair still evaluating", index);
            return Err(EngineError::AlreadyEvaluating);
        }

        let identity = match self.grid.reveal(index) {
            Ok(card) => card.identity,
            Err(err) => {
                log::debug!("reveal of card {} refused: {}", index, err);
                return Err(err);
            }
        };
        log::debug!("revealed {} at {}", identity, index);
        self.bus.publish(&EngineEvent::CardRevealed(CardRef::new(index, identity)));

        if let Some(pair) = self.evaluator.accept(index, &self.grid) {
            self.bus.publish(&EngineEvent::EvaluationStarted {
                first: pair.first,
                second: pair.second,
            });
            self.scheduler
                .schedule(pair.outcome.settle_ms(&self.config.timings), Continuation::ResolvePair);
        }
        Ok(())
    }

    /// Use the next power-up. Returns the remaining count.
    pub fn request_activate_power_up(&mut self) -> EngineResult<u32> {
        self.run_due();

        let effect = self.registry.activate(&mut self.grid)?;
        let remaining = self.registry.count();
        self.bus.publish(&EngineEvent::PowerUpCountChanged(remaining));

        match effect {
            PowerUpEffect::Hint { indices } if !indices.is_empty() => {
                self.bus.publish(&EngineEvent::HintStarted {
                    indices: indices.clone(),
                });
                self.scheduler
                    .schedule(self.config.timings.hint_window_ms, Continuation::EndHint { indices });
            }
            PowerUpEffect::Hint { .. } => {}
        }
        Ok(remaining)
    }

    /// Throw the current game away and deal a new one with the same grid
    /// size and a full power-up bag.
    ///
    /// Listeners stay subscribed. The deal continues the session's random
    /// stream, so a seeded session replays the same sequence of games.
    pub fn new_game(&mut self) -> EngineResult<()> {
        let identities = self.generator.deal(self.config.rows, self.config.cols, &mut self.rng)?;
        self.grid = CardGrid::build(self.config.rows, self.config.cols, identities)?;

        self.scheduler.clear();
        self.evaluator.reset();
        self.registry = PowerUpRegistry::with_reveal_all(self.config.power_ups);
        self.score.set_score(0);
        self.turns.set_turns(0);
        self.resumed = false;

        log::info!("new {}x{} game", self.config.rows, self.config.cols);
        self.bus.publish(&EngineEvent::ScoreChanged(0));
        self.bus.publish(&EngineEvent::TurnsChanged(0));
        self.bus.publish(&EngineEvent::PowerUpCountChanged(self.registry.count()));
        Ok(())
    }

    /// Capture the persistable state without touching the save slot.
    ///
    /// Fails with `EvaluationInFlight` while anything is scheduled.
    pub fn snapshot(&self) -> EngineResult<GameSnapshot> {
        if !self.scheduler.is_idle() {
            return Err(EngineError::EvaluationInFlight);
        }
        Ok(GameSnapshot::capture(
            &self.grid,
            self.score.score(),
            self.turns.turns(),
            self.registry.count(),
        ))
    }

    /// Write the current state to the save slot.
    pub fn request_save(&mut self) -> EngineResult<GameSnapshot> {
        self.run_due();
        let snapshot = self.snapshot()?;
        self.slot().write(&snapshot)?;
        Ok(snapshot)
    }

    /// Replace the session state with the save slot's contents.
    ///
    /// On failure the session is left unchanged.
    pub fn request_load(&mut self) -> EngineResult<()> {
        let snapshot = self.slot().read()?;
        self.restore(&snapshot)
    }

    /// Replace the session state with `snapshot`.
    ///
    /// The snapshot is validated first; on failure nothing changes. Scheduled
    /// work is dropped, and the single unmatched face-up card, if any, is
    /// queued for evaluation again.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> EngineResult<()> {
        snapshot.validate()?;
        let grid = CardGrid::restore_from(snapshot.grid.rows, snapshot.grid.cols, &snapshot.grid.cards)?;

        self.scheduler.clear();
        self.evaluator.reset();
        self.grid = grid;
        self.config.rows = snapshot.grid.rows;
        self.config.cols = snapshot.grid.cols;
        self.registry = PowerUpRegistry::with_reveal_all(snapshot.power_up_count);
        self.score.set_score(snapshot.score);
        self.turns.set_turns(snapshot.turns);
        self.resumed = true;

        log::info!(
            "restored {}x{} game: score {}, turns {}, {} power-ups",
            snapshot.grid.rows,
            snapshot.grid.cols,
            snapshot.score,
            snapshot.turns,
            snapshot.power_up_count
        );

        self.bus.publish(&EngineEvent::ScoreChanged(snapshot.score));
        self.bus.publish(&EngineEvent::TurnsChanged(snapshot.turns));
        self.bus.publish(&EngineEvent::PowerUpCountChanged(snapshot.power_up_count));

        for index in snapshot.face_up_unmatched() {
            if let Some(pair) = self.evaluator.accept(index, &self.grid) {
                self.bus.publish(&EngineEvent::EvaluationStarted {
                    first: pair.first,
                    second: pair.second,
                });
                self.scheduler
                    .schedule(pair.outcome.settle_ms(&self.config.timings), Continuation::ResolvePair);
            }
        }

        if self.grid.is_complete() {
            self.scheduler
                .schedule(self.config.timings.finish_settle_ms, Continuation::FinishGame);
        }
        Ok(())
    }

    // === Time ===

    /// Advance the virtual clock, running continuations as they fall due.
    ///
    /// Continuations scheduled by earlier ones within the same tick run too
    /// if they are due by the end of it.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);

        while let Some(due) = self.scheduler.next_due_ms().filter(|&due| due <= target) {
            let step = due.saturating_sub(self.scheduler.now_ms());
            for continuation in self.scheduler.advance(step) {
                self.run_continuation(continuation);
            }
        }

        let rest = target.saturating_sub(self.scheduler.now_ms());
        for continuation in self.scheduler.advance(rest) {
            self.run_continuation(continuation);
        }
    }

    /// Run every scheduled continuation, jumping the clock as needed.
    ///
    /// Returns the virtual milliseconds that elapsed.
    pub fn run_until_idle(&mut self) -> u64 {
        let start = self.scheduler.now_ms();
        while self.scheduler.skip_to_next().is_some() {
            self.run_due();
        }
        self.scheduler.now_ms() - start
    }

    fn run_due(&mut self) {
        while let Some(continuation) = self.scheduler.pop_due() {
            self.run_continuation(continuation);
        }
    }

    fn run_continuation(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::ResolvePair => self.resolve_pair(),
            Continuation::FinishGame => {
                if self.evaluator.mark_finished() {
                    log::info!(
                        "game finished: score {}, turns {}",
                        self.score.score(),
                        self.turns.turns()
                    );
                    self.bus.publish(&EngineEvent::GameFinished);
                }
            }
            Continuation::EndHint { indices } => {
                let hidden: Vec<CardIndex> = indices.into_iter().filter(|&index| self.grid.end_hint(index)).collect();
                self.bus.publish(&EngineEvent::HintEnded { indices: hidden });
            }
        }
    }

    fn resolve_pair(&mut self) {
        let Some(resolution) = self.evaluator.resolve(&mut self.grid) else {
            return;
        };
        let (first, second) = (resolution.pair.first, resolution.pair.second);

        match resolution.pair.outcome {
            PairOutcome::Match => {
                let score = match self.score.add_score(POINTS_PER_MATCH) {
                    Ok(score) => score,
                    Err(err) => {
                        log::error!("match award rejected: {}", err);
                        self.score.score()
                    }
                };
                let turns = self.turns.increment_turn();
                log::info!("match: {} and {}", first.identity, second.identity);

                self.bus.publish(&EngineEvent::ScoreChanged(score));
                self.bus.publish(&EngineEvent::TurnsChanged(turns));
                self.bus.publish(&EngineEvent::MatchFound { first, second });

                if resolution.completed {
                    self.scheduler
                        .schedule(self.config.timings.finish_settle_ms, Continuation::FinishGame);
                }
            }
            PairOutcome::NoMatch => {
                let turns = self.turns.increment_turn();
                log::debug!("no match: {} and {}", first.identity, second.identity);

                self.bus.publish(&EngineEvent::TurnsChanged(turns));
                self.bus.publish(&EngineEvent::NoMatch { first, second });
            }
        }
    }

    fn slot(&self) -> SaveSlot {
        SaveSlot::new(self.config.save_path.clone(), self.config.snapshot_format)
    }
}
