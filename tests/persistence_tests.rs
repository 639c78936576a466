//! Save/load integration tests.

use std::path::PathBuf;

use proptest::prelude::*;

use pair_match::persistence::{GameSnapshot, SaveSlot, SnapshotFormat};
use pair_match::powerups::MAX_POWER_UPS;
use pair_match::{EngineError, GameSession, SessionConfig, SnapshotFault};

fn temp_slot(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pair-match-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

/// Play a sequence of reveal attempts, letting each pair settle.
///
/// Rejected reveals are ignored, the way a UI would drop them.
fn play(session: &mut GameSession, reveals: &[usize], hint_at: Option<usize>) {
    let len = session.grid().len();
    for (step, &index) in reveals.iter().enumerate() {
        if hint_at == Some(step) {
            let _ = session.request_activate_power_up();
        }
        let _ = session.request_reveal(index % len);
        if session.is_evaluating() {
            session.run_until_idle();
        }
    }
    session.run_until_idle();
}

fn per_card(session: &GameSession) -> Vec<(u32, bool, bool)> {
    session
        .grid()
        .iter()
        .map(|card| (card.identity.id.raw(), card.is_matched(), card.is_face_up()))
        .collect()
}

// =============================================================================
// Round Trip
// =============================================================================

proptest! {
    /// Loading a save of any reachable state reproduces score, turns,
    /// power-ups and every card's identity, matched flag and orientation.
    #[test]
    fn test_round_trip_reachable_states(
        preset in 0usize..6,
        seed in any::<u64>(),
        reveals in prop::collection::vec(0usize..24, 0..40),
        hint_at in prop::option::of(0usize..40),
        binary in any::<bool>(),
    ) {
        let format = if binary { SnapshotFormat::Binary } else { SnapshotFormat::Json };
        let preset = pair_match::GridPreset::from_menu_index(preset).unwrap();
        let config = SessionConfig::from_preset(preset).with_seed(seed);

        let mut session = GameSession::new(config).unwrap();
        play(&mut session, &reveals, hint_at);
        let saved = session.snapshot().unwrap();

        let bytes = format.encode(&saved).unwrap();
        let decoded = format.decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &saved);

        let mut resumed = GameSession::new(SessionConfig::new(2, 2)).unwrap();
        resumed.restore(&decoded).unwrap();

        prop_assert_eq!(resumed.score(), session.score());
        prop_assert_eq!(resumed.turns(), session.turns());
        prop_assert_eq!(resumed.power_up_count(), session.power_up_count());
        prop_assert_eq!(per_card(&resumed), per_card(&session));
        prop_assert_eq!(resumed.pending_reveals(), session.pending_reveals());

        // A completed grid schedules its finish signal on restore
        resumed.run_until_idle();
        prop_assert_eq!(resumed.is_finished(), session.is_finished());
        prop_assert_eq!(resumed.snapshot().unwrap(), saved);
    }
}

/// Saving through the slot and starting with the load flag resumes the game.
#[test]
fn test_save_then_start_resumes() {
    let path = temp_slot("resume.json");
    let config = SessionConfig::new(3, 4).with_seed(5).with_save_path(&path);

    let mut session = GameSession::new(config.clone()).unwrap();
    play(&mut session, &[0, 1, 2, 3, 4], Some(1));
    let saved = session.request_save().unwrap();

    let resumed = GameSession::start(config.with_load_saved_game(true)).unwrap();
    assert!(resumed.is_resumed());
    assert_eq!(resumed.snapshot().unwrap(), saved);
    assert_eq!(resumed.power_up_count(), 2);

    SaveSlot::new(&path, SnapshotFormat::Json).clear().unwrap();
}

/// Resuming takes the saved grid size, not the configured one.
#[test]
fn test_resume_uses_saved_dimensions() {
    let path = temp_slot("dimensions.bin");
    let mut session = GameSession::new(
        SessionConfig::new(4, 6)
            .with_seed(8)
            .with_save_path(&path)
            .with_snapshot_format(SnapshotFormat::Binary),
    )
    .unwrap();
    session.request_save().unwrap();

    let config = SessionConfig::new(2, 2)
        .with_load_saved_game(true)
        .with_save_path(&path)
        .with_snapshot_format(SnapshotFormat::Binary);
    let resumed = GameSession::start(config).unwrap();

    assert_eq!((resumed.grid().rows(), resumed.grid().cols()), (4, 6));
    assert_eq!((resumed.config().rows, resumed.config().cols), (4, 6));
}

/// `request_load` replaces in-progress state; a failed load changes nothing.
#[test]
fn test_request_load() {
    let path = temp_slot("request-load.json");
    let config = SessionConfig::new(2, 3).with_seed(3).with_save_path(&path);

    let mut session = GameSession::new(config).unwrap();
    SaveSlot::new(&path, SnapshotFormat::Json).clear().unwrap();

    let before = session.grid().clone();
    assert_eq!(
        session.request_load(),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::Missing))
    );
    assert_eq!(session.grid(), &before);

    session.request_save().unwrap();
    session.request_reveal(0).unwrap();
    session.request_reveal(1).unwrap();

    // Load drops the pair still evaluating
    session.request_load().unwrap();
    assert!(!session.is_evaluating());
    assert!(session.is_idle());
    assert_eq!(session.grid(), &before);
    assert_eq!(session.turns(), 0);
}

// =============================================================================
// Corrupt Snapshots
// =============================================================================

fn fresh_snapshot() -> GameSnapshot {
    GameSession::new(SessionConfig::new(2, 2).with_seed(11))
        .unwrap()
        .snapshot()
        .unwrap()
}

#[test]
fn test_decode_rejects_wrong_card_count() {
    let mut value = serde_json::to_value(fresh_snapshot()).unwrap();
    value["grid"]["rows"] = serde_json::json!(3);
    let bytes = serde_json::to_vec(&value).unwrap();

    assert_eq!(
        SnapshotFormat::Json.decode(&bytes),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::CardCountMismatch {
            expected: 6,
            found: 4
        }))
    );
}

#[test]
fn test_decode_rejects_unknown_rank() {
    let mut value = serde_json::to_value(fresh_snapshot()).unwrap();
    value["grid"]["cards"][0]["identity"]["rank"] = serde_json::json!("Z");
    let bytes = serde_json::to_vec(&value).unwrap();

    assert!(matches!(
        SnapshotFormat::Json.decode(&bytes),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::Malformed(_)))
    ));
}

#[test]
fn test_decode_rejects_truncated_binary() {
    let bytes = SnapshotFormat::Binary.encode(&fresh_snapshot()).unwrap();
    let truncated = &bytes[..bytes.len() / 2];

    assert!(matches!(
        SnapshotFormat::Binary.decode(truncated),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::Malformed(_)))
    ));
}

/// A save claiming billions of power-ups is refused, and startup falls back
/// to a fresh game instead of trying to rebuild the bag.
#[test]
fn test_rejects_huge_power_up_count() {
    let mut value = serde_json::to_value(fresh_snapshot()).unwrap();
    value["powerUpCount"] = serde_json::json!(u32::MAX);
    let bytes = serde_json::to_vec(&value).unwrap();

    assert_eq!(
        SnapshotFormat::Json.decode(&bytes),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::PowerUpCountOutOfRange {
            count: u32::MAX,
            max: MAX_POWER_UPS,
        }))
    );

    let path = temp_slot("huge-power-ups.json");
    std::fs::write(&path, &bytes).unwrap();
    let session = GameSession::start(
        SessionConfig::new(2, 3)
            .with_seed(2)
            .with_load_saved_game(true)
            .with_save_path(&path),
    )
    .unwrap();

    assert!(!session.is_resumed());
    assert_eq!(session.power_up_count(), 3);
    assert_eq!(session.grid().len(), 6);
    std::fs::remove_file(&path).unwrap();
}

/// Saves that could never be played to completion fail to decode.
#[test]
fn test_decode_rejects_unfinishable_grids() {
    let mut value = serde_json::to_value(fresh_snapshot()).unwrap();
    for card in value["grid"]["cards"].as_array_mut().unwrap() {
        card["orientation"] = serde_json::json!("FaceUp");
    }
    let bytes = serde_json::to_vec(&value).unwrap();
    assert_eq!(
        SnapshotFormat::Json.decode(&bytes),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::TooManyFaceUp(4)))
    );

    let mut value = serde_json::to_value(fresh_snapshot()).unwrap();
    value["grid"]["cards"][0]["matched"] = serde_json::json!(true);
    let bytes = serde_json::to_vec(&value).unwrap();
    assert!(matches!(
        SnapshotFormat::Json.decode(&bytes),
        Err(EngineError::CorruptOrMissingSnapshot(SnapshotFault::UnpairedFace { .. }))
    ));
}

/// JSON saves are readable and use the documented field names.
#[test]
fn test_json_save_layout() {
    let path = temp_slot("layout.json");
    let mut session = GameSession::new(SessionConfig::new(2, 2).with_seed(4).with_save_path(&path)).unwrap();
    session.request_save().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["score"], 0);
    assert_eq!(value["turns"], 0);
    assert_eq!(value["powerUpCount"], 3);
    assert_eq!(value["grid"]["cards"].as_array().unwrap().len(), 4);
    assert_eq!(value["grid"]["cards"][0]["orientation"], "FaceDown");
}
