//! GameSession integration tests.
//!
//! Layouts are fixed by restoring a hand-built snapshot, so these tests do
//! not depend on the shuffle.

use std::cell::RefCell;
use std::rc::Rc;

use pair_match::cards::{CardId, CardIdentity, Orientation, Rank, Suit};
use pair_match::persistence::{CardSnapshot, GameSnapshot, GridSnapshot};
use pair_match::{EngineError, EngineEvent, GameSession, SessionConfig, SnapshotFault, SnapshotFormat};

/// Snapshot of a fresh game with the given faces, in grid order.
fn layout(rows: usize, cols: usize, ranks: &[Rank]) -> GameSnapshot {
    let cards = ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| {
            let identity = CardIdentity::new(CardId(i as u32), Suit::Hearts, rank);
            CardSnapshot::new(identity, false, Orientation::FaceDown)
        })
        .collect();

    GameSnapshot {
        score: 0,
        turns: 0,
        power_up_count: 3,
        grid: GridSnapshot { rows, cols, cards },
    }
}

/// Session on a fixed 2x2 layout: 0 and 1 pair, 2 and 3 pair.
fn session_2x2() -> GameSession {
    let mut session = GameSession::new(SessionConfig::new(2, 2).with_seed(1)).unwrap();
    session
        .restore(&layout(2, 2, &[Rank::Ace, Rank::Ace, Rank::Two, Rank::Two]))
        .unwrap();
    session
}

/// Session on a fixed 2x3 layout: pairs at (0,3), (1,4), (2,5).
fn session_2x3() -> GameSession {
    let mut session = GameSession::new(SessionConfig::new(2, 3).with_seed(1)).unwrap();
    session
        .restore(&layout(
            2,
            3,
            &[Rank::Ace, Rank::Two, Rank::Three, Rank::Ace, Rank::Two, Rank::Three],
        ))
        .unwrap();
    session
}

fn record(session: &mut GameSession) -> Rc<RefCell<Vec<EngineEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn count(events: &[EngineEvent], name: &str) -> usize {
    events.iter().filter(|event| event.name() == name).count()
}

// =============================================================================
// Full Game Scenario
// =============================================================================

/// Two matches on a 2x2 grid complete the game and finish fires once.
#[test]
fn test_2x2_scenario() {
    let mut session = session_2x2();
    let events = record(&mut session);

    session.request_reveal(0).unwrap();
    session.request_reveal(1).unwrap();
    session.tick(200);
    assert_eq!((session.score(), session.turns()), (1, 1));
    assert!(!session.grid().is_complete());

    session.request_reveal(2).unwrap();
    session.request_reveal(3).unwrap();
    session.tick(200);
    assert_eq!((session.score(), session.turns()), (2, 2));
    assert!(session.grid().is_complete());
    assert!(!session.is_finished());

    // Finish settles 200ms after the final match
    session.tick(199);
    assert!(!session.is_finished());
    session.tick(1);
    assert!(session.is_finished());

    session.run_until_idle();
    session.tick(10_000);
    let events = events.borrow();
    assert_eq!(count(&events, "game_finished"), 1);
    assert_eq!(count(&events, "match_found"), 2);
    assert_eq!(events.last(), Some(&EngineEvent::GameFinished));
}

/// Events for one matching pair arrive in a fixed order.
#[test]
fn test_match_event_order() {
    let mut session = session_2x2();
    let events = record(&mut session);

    session.request_reveal(1).unwrap();
    session.request_reveal(0).unwrap();
    session.run_until_idle();

    let names: Vec<_> = events.borrow().iter().map(EngineEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "card_revealed",
            "card_revealed",
            "evaluation_started",
            "score_changed",
            "turns_changed",
            "match_found",
        ]
    );
    match &events.borrow()[2] {
        EngineEvent::EvaluationStarted { first, second } => {
            assert_eq!((first.index, second.index), (1, 0));
        }
        other => panic!("unexpected {:?}", other),
    };
}

// =============================================================================
// Match / No-Match Properties
// =============================================================================

/// Every matching pair deactivates both, +1 score, +1 turn.
#[test]
fn test_every_match_scores_once() {
    for (a, b) in [(0, 3), (4, 1), (2, 5)] {
        let mut session = session_2x3();
        session.request_reveal(a).unwrap();
        session.request_reveal(b).unwrap();
        session.run_until_idle();

        assert_eq!((session.score(), session.turns()), (1, 1), "pair {} {}", a, b);
        assert!(session.grid().get(a).unwrap().is_matched());
        assert!(session.grid().get(b).unwrap().is_matched());
        assert_eq!(session.grid().active_count(), 4);
    }
}

/// Every non-matching pair flips back, +1 turn, score unchanged.
#[test]
fn test_every_mismatch_flips_back() {
    for (a, b) in [(0, 1), (0, 2), (1, 5), (4, 3)] {
        let mut session = session_2x3();
        session.request_reveal(a).unwrap();
        session.request_reveal(b).unwrap();
        session.run_until_idle();

        assert_eq!((session.score(), session.turns()), (0, 1), "pair {} {}", a, b);
        assert!(session.grid().face_up_active().is_empty());
        assert_eq!(session.grid().active_count(), 6);
    }
}

// =============================================================================
// Rejected Input
// =============================================================================

/// A third reveal during the settle window is refused without side effects.
#[test]
fn test_third_reveal_refused() {
    let mut session = session_2x3();
    session.request_reveal(0).unwrap();
    session.request_reveal(1).unwrap();
    let before = session.grid().clone();

    assert_eq!(session.request_reveal(2), Err(EngineError::AlreadyEvaluating));
    assert_eq!(session.grid(), &before);

    session.tick(400);
    assert!(session.request_reveal(2).is_ok());
}

#[test]
fn test_reveal_errors() {
    let mut session = session_2x2();
    session.request_reveal(0).unwrap();

    assert_eq!(
        session.request_reveal(0),
        Err(EngineError::AlreadyRevealedOrInactive { index: 0 })
    );
    assert_eq!(
        session.request_reveal(9),
        Err(EngineError::InvalidCardIndex { index: 9, len: 4 })
    );
    assert!(session.request_reveal(0).unwrap_err().is_ignorable_input());
    assert_eq!(session.pending_reveals(), &[0]);
}

/// Oversize grids fail before any grid exists.
#[test]
fn test_oversize_grid() {
    let result = GameSession::new(SessionConfig::new(10, 12));
    assert_eq!(
        result.map(|_| ()),
        Err(EngineError::InvalidGridSize { rows: 10, cols: 12, capacity: 104 })
    );
}

// =============================================================================
// Power-ups
// =============================================================================

/// The hint shows every hidden card for the window, then hides them.
#[test]
fn test_hint_power_up() {
    let mut session = session_2x3();
    let events = record(&mut session);

    session.request_reveal(0).unwrap();
    assert_eq!(session.request_activate_power_up(), Ok(2));
    assert_eq!(session.power_up_count(), 2);
    assert_eq!(session.grid().face_up_active(), vec![0, 1, 2, 3, 4, 5]);

    // Hinted cards cannot be revealed during the window
    assert_eq!(
        session.request_reveal(3),
        Err(EngineError::AlreadyRevealedOrInactive { index: 3 })
    );

    session.tick(999);
    assert_eq!(session.grid().face_up_active().len(), 6);
    session.tick(1);
    assert_eq!(session.grid().face_up_active(), vec![0]);
    // The player's pending reveal survived, and the hint cost no turn
    assert_eq!(session.pending_reveals(), &[0]);
    assert_eq!(session.turns(), 0);

    let events = events.borrow();
    assert!(events.contains(&EngineEvent::PowerUpCountChanged(2)));
    assert!(events.contains(&EngineEvent::HintStarted { indices: vec![1, 2, 3, 4, 5] }));
    assert!(events.contains(&EngineEvent::HintEnded { indices: vec![1, 2, 3, 4, 5] }));
}

#[test]
fn test_power_ups_run_out() {
    let mut session = GameSession::new(SessionConfig::new(2, 2).with_power_ups(1)).unwrap();
    session.request_activate_power_up().unwrap();
    session.run_until_idle();

    let before = session.grid().clone();
    assert_eq!(session.request_activate_power_up(), Err(EngineError::NoPowerUpsAvailable));
    assert_eq!(session.grid(), &before);
    assert_eq!(session.power_up_count(), 0);
}

// =============================================================================
// Saving and Resuming
// =============================================================================

#[test]
fn test_save_refused_mid_evaluation() {
    let mut session = session_2x2();
    session.request_reveal(0).unwrap();
    session.request_reveal(2).unwrap();

    assert_eq!(session.snapshot(), Err(EngineError::EvaluationInFlight));
    assert_eq!(session.request_save(), Err(EngineError::EvaluationInFlight));

    session.tick(400);
    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.turns, 1);
}

/// A missing save slot starts a fresh game instead of failing.
#[test]
fn test_start_falls_back_when_slot_missing() {
    let path = std::env::temp_dir().join(format!("pair-match-no-save-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let config = SessionConfig::new(3, 4).with_load_saved_game(true).with_save_path(&path);
    let session = GameSession::start(config).unwrap();

    assert!(!session.is_resumed());
    assert_eq!(session.grid().len(), 12);
    assert_eq!(session.power_up_count(), 3);
}

/// A corrupt save slot starts a fresh game instead of failing.
#[test]
fn test_start_falls_back_when_slot_corrupt() {
    let path = std::env::temp_dir().join(format!("pair-match-corrupt-{}.bin", std::process::id()));
    std::fs::write(&path, b"definitely not a snapshot").unwrap();

    let config = SessionConfig::new(2, 2)
        .with_load_saved_game(true)
        .with_save_path(&path)
        .with_snapshot_format(SnapshotFormat::Binary);
    let session = GameSession::start(config).unwrap();

    assert!(!session.is_resumed());
    assert_eq!(session.grid().len(), 4);
    std::fs::remove_file(&path).unwrap();
}

/// Restoring an already complete grid still delivers the finish signal.
#[test]
fn test_restore_complete_grid_finishes() {
    let mut snapshot = layout(1, 2, &[Rank::King, Rank::King]);
    for card in &mut snapshot.grid.cards {
        card.matched = true;
    }

    let mut session = GameSession::new(SessionConfig::new(2, 2)).unwrap();
    let events = record(&mut session);
    session.restore(&snapshot).unwrap();
    session.run_until_idle();

    assert!(session.is_finished());
    assert_eq!(count(&events.borrow(), "game_finished"), 1);
}

/// Restoring a bad snapshot leaves the session untouched.
#[test]
fn test_restore_rejects_invalid_snapshot() {
    let mut session = session_2x2();
    session.request_reveal(0).unwrap();
    let before = session.grid().clone();

    let mut snapshot = layout(2, 2, &[Rank::Ace, Rank::Ace, Rank::Two, Rank::Two]);
    snapshot.grid.cards.pop();

    assert!(matches!(
        session.restore(&snapshot),
        Err(EngineError::CorruptOrMissingSnapshot(_))
    ));
    assert_eq!(session.grid(), &before);
    assert_eq!(session.pending_reveals(), &[0]);
}

/// Four face-up unmatched cards would strand a pair in the queue forever.
#[test]
fn test_restore_rejects_stranded_face_up_cards() {
    let mut session = session_2x2();
    let before = session.grid().clone();

    let mut snapshot = layout(1, 4, &[Rank::Ace, Rank::Ace, Rank::Two, Rank::Two]);
    for card in &mut snapshot.grid.cards {
        card.orientation = Orientation::FaceUp;
    }

    assert_eq!(
        session.restore(&snapshot),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::TooManyFaceUp(4)))
    );
    assert_eq!(session.grid(), &before);
    assert!(session.pending_reveals().is_empty());
}

/// A face without its partner can never be matched, so the grid is refused.
#[test]
fn test_restore_rejects_unpaired_face() {
    let mut session = session_2x2();

    let snapshot = layout(1, 2, &[Rank::Ace, Rank::Two]);
    assert!(matches!(
        session.restore(&snapshot),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::UnpairedFace { .. }))
    ));
    assert_eq!((session.grid().rows(), session.grid().cols()), (2, 2));
}

/// One face-up card survives a restore and finishes the game with its partner.
#[test]
fn test_restore_single_face_up_card_completes() {
    let mut snapshot = layout(1, 2, &[Rank::Queen, Rank::Queen]);
    snapshot.grid.cards[1].orientation = Orientation::FaceUp;

    let mut session = GameSession::new(SessionConfig::new(2, 2)).unwrap();
    let events = record(&mut session);
    session.restore(&snapshot).unwrap();
    assert_eq!(session.pending_reveals(), &[1]);

    session.request_reveal(0).unwrap();
    session.run_until_idle();
    assert!(session.is_finished());
    assert_eq!(count(&events.borrow(), "game_finished"), 1);
}

// =============================================================================
// Observers
// =============================================================================

/// Tracker observers are called in subscription order with new values.
#[test]
fn test_tracker_observers() {
    let mut session = session_2x2();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    session.subscribe_score(move |score| sink.borrow_mut().push(("score", score)));
    let sink = Rc::clone(&seen);
    session.subscribe_turns(move |turns| sink.borrow_mut().push(("turns", turns)));

    session.request_reveal(0).unwrap();
    session.request_reveal(2).unwrap();
    session.run_until_idle();
    session.request_reveal(0).unwrap();
    session.request_reveal(1).unwrap();
    session.run_until_idle();

    assert_eq!(*seen.borrow(), vec![("turns", 1), ("score", 1), ("turns", 2)]);
}

#[test]
fn test_unsubscribe_stops_events() {
    let mut session = session_2x2();
    let events = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&events);
    let id = session.subscribe(move |_| *sink.borrow_mut() += 1);

    session.request_reveal(0).unwrap();
    assert_eq!(*events.borrow(), 1);

    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));
    session.request_reveal(1).unwrap();
    assert_eq!(*events.borrow(), 1);
}
