//! End-to-end gate tests over the SQLite stores
//!
//! Tests cover:
//! - PIN registration followed by unlock of the seeded notes
//! - Rejection against a stored PIN
//! - Hashed PIN storage
//! - Cursor release against the real provider

use notegate_core::testing::init_tracing;
use notegate_core::{
    AccessGate, ConfigProvider, GateConfig, GateResult, GateState, PinInput, RecordingNotifier,
    RecordingSink, SecretFormat, INVALID_PIN_MESSAGE,
};
use notegate_storage_sqlite::{open_stores, Database, DEFAULT_NOTES};
use tempfile::TempDir;

#[test]
fn test_registered_pin_reveals_seeded_notes() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (settings, notes) = open_stores(Database::open(dir.path().join("notes.db")).unwrap());
    settings
        .register_pin("pkey", "1234", SecretFormat::Cleartext)
        .unwrap();

    let sink = RecordingSink::new();
    let mut gate = AccessGate::new(
        GateConfig::default(),
        settings,
        notes.clone(),
        sink.clone(),
        RecordingNotifier::new(),
    );
    let mut input = PinInput::new("1234");

    let result = gate.attempt_access(&mut input);

    let records = result.records();
    assert_eq!(records.len(), DEFAULT_NOTES.len());
    for (record, (title, note)) in records.iter().zip(DEFAULT_NOTES) {
        assert_eq!(record.title, title);
        assert_eq!(record.note, note);
    }
    assert_eq!(sink.bound_records().unwrap().len(), DEFAULT_NOTES.len());
    assert_eq!(gate.state(), GateState::Unlocked);
    assert!(input.is_empty());
    assert_eq!(notes.open_cursors(), 0);
}

#[test]
fn test_wrong_pin_rejected_against_database() {
    init_tracing();
    let (settings, notes) = open_stores(Database::open_in_memory().unwrap());
    settings.put("pkey", "1234").unwrap();

    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut gate = AccessGate::new(
        GateConfig::default(),
        settings,
        notes.clone(),
        sink.clone(),
        notifier.clone(),
    );

    let result = gate.attempt_access(&mut PinInput::new("0000"));

    assert_eq!(result, GateResult::Rejected(INVALID_PIN_MESSAGE.to_string()));
    assert_eq!(notifier.messages(), vec![INVALID_PIN_MESSAGE.to_string()]);
    assert_eq!(sink.bind_calls(), 0);
    assert_eq!(gate.state(), GateState::Locked);
}

#[test]
fn test_unset_pin_in_database() {
    init_tracing();
    let (settings, notes) = open_stores(Database::open_in_memory().unwrap());
    assert!(settings.get("pkey").unwrap().is_none());

    let mut strict = AccessGate::new(
        GateConfig::default(),
        settings.clone(),
        notes.clone(),
        RecordingSink::new(),
        RecordingNotifier::new(),
    );
    assert!(!strict.attempt_access(&mut PinInput::new("")).is_unlocked());

    let mut legacy = AccessGate::new(
        GateConfig::legacy(),
        settings,
        notes,
        RecordingSink::new(),
        RecordingNotifier::new(),
    );
    assert!(legacy.attempt_access(&mut PinInput::new("")).is_unlocked());
}

#[test]
fn test_hashed_pin_round_trip_through_database() {
    init_tracing();
    let (settings, notes) = open_stores(Database::open_in_memory().unwrap());
    settings
        .register_pin("pkey", "8642", SecretFormat::Argon2Phc)
        .unwrap();

    let config = GateConfig {
        secret_format: SecretFormat::Argon2Phc,
        ..GateConfig::default()
    };
    let mut gate = AccessGate::new(
        config,
        settings,
        notes,
        RecordingSink::new(),
        RecordingNotifier::new(),
    );

    assert!(!gate.attempt_access(&mut PinInput::new("2468")).is_unlocked());
    assert!(gate.attempt_access(&mut PinInput::new("8642")).is_unlocked());
}

#[test]
fn test_missing_notes_table_still_unlocks() {
    init_tracing();
    let db = Database::open_in_memory().unwrap();
    db.conn().execute("DROP TABLE notes", []).unwrap();
    let (settings, notes) = open_stores(db);
    settings.put("pkey", "1234").unwrap();

    let sink = RecordingSink::new();
    let mut gate = AccessGate::new(
        GateConfig::default(),
        settings,
        notes.clone(),
        sink.clone(),
        RecordingNotifier::new(),
    );

    let result = gate.attempt_access(&mut PinInput::new("1234"));

    assert_eq!(result, GateResult::Unlocked(Vec::new()));
    assert_eq!(sink.bound_records(), Some(Vec::new()));
    assert_eq!(notes.open_cursors(), 0);
}

#[test]
fn test_reopen_after_lost_version_row_keeps_single_seed() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn().execute("DELETE FROM schema_version", []).unwrap();
    }

    let (settings, notes) = open_stores(Database::open(&path).unwrap());
    settings.put("pkey", "1234").unwrap();
    let mut gate = AccessGate::new(
        GateConfig::default(),
        settings,
        notes,
        RecordingSink::new(),
        RecordingNotifier::new(),
    );

    let result = gate.attempt_access(&mut PinInput::new("1234"));
    assert_eq!(result.records().len(), DEFAULT_NOTES.len());
}
