use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use shadowgym::engine::skills::{HYPER_ANABOLIC, SHADOW_MOMENTUM};
use shadowgym::engine::StatKey;
use shadowgym::persist::{
    JsonFileStore, SavePhase, SnapshotStore, PLAYER_ID_FILE, SAVE_DEBOUNCE,
};
use shadowgym::session::Session;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "shadowgym-it-{tag}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn player_identity_is_stable_across_reopens() {
    let dir = temp_dir("identity");
    let first = Session::open(dir.clone(), true, 7);
    let second = Session::open(dir.clone(), true, 8);
    assert_eq!(first.player_id, second.player_id);
    assert!(dir.join(PLAYER_ID_FILE).exists());
}

#[test]
fn partial_remote_document_merges_and_unlocks_on_open() {
    let dir = temp_dir("partial-merge");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(PLAYER_ID_FILE), "tester").unwrap();

    let doc_path = JsonFileStore::new(&dir).document_path("tester");
    fs::create_dir_all(doc_path.parent().unwrap()).unwrap();
    fs::write(&doc_path, r#"{"level":5,"stats":{"strength":50}}"#).unwrap();

    let session = Session::open(dir, true, 7);
    let state = &session.engine.state;

    assert_eq!(session.player_id, "tester");
    assert_eq!(state.level, 5);
    assert_eq!(state.stats[&StatKey::Strength].value, 50);
    // Absent fields keep in-memory defaults.
    assert_eq!(state.xp, 0);
    assert_eq!(state.xp_to_level, 120);
    assert_eq!(state.stats[&StatKey::Agility].value, 14);
    // Remote level satisfies unlock predicates immediately.
    assert!(state.has_skill(SHADOW_MOMENTUM));
    assert!(state.has_skill(HYPER_ANABOLIC));
}

#[test]
fn rapid_mutations_ride_one_debounce_window() {
    let dir = temp_dir("debounce");
    let mut session = Session::open(dir.clone(), true, 7);
    let store = JsonFileStore::new(&dir);
    let player_id = session.player_id.clone();

    // Each gain crosses a threshold, so each one dirties the engine.
    let t0 = Instant::now();
    session.engine.add_xp(120);
    session.pump(t0);
    session.engine.add_xp(194);
    session.pump(t0 + SAVE_DEBOUNCE / 4);
    session.engine.add_xp(310);
    session.pump(t0 + SAVE_DEBOUNCE / 2);

    // Nothing written while the window is still open.
    assert_eq!(session.reconciler.phase(), SavePhase::Dirty);
    let before = store.load(&player_id).unwrap().unwrap();
    assert_eq!(before.level, Some(1));

    // One pump past the last-reset deadline flushes all three mutations.
    session.pump(t0 + SAVE_DEBOUNCE / 2 + SAVE_DEBOUNCE);
    assert_eq!(session.reconciler.phase(), SavePhase::Clean);
    let after = store.load(&player_id).unwrap().unwrap();
    assert_eq!(after.level, Some(4));
    assert_eq!(after.xp, Some(0));
    // round(310 * 1.32 + 4 * 18) = 481
    assert_eq!(after.xp_to_level, Some(481));
}

#[test]
fn flush_writes_immediately_without_the_window() {
    let dir = temp_dir("flush");
    let mut session = Session::open(dir.clone(), true, 7);
    let store = JsonFileStore::new(&dir);

    session.engine.add_xp(120);
    session.flush();

    let doc = store.load(&session.player_id).unwrap().unwrap();
    assert_eq!(doc.level, Some(2));
}

#[test]
fn reopened_session_resumes_from_the_written_document() {
    let dir = temp_dir("resume");
    {
        let mut session = Session::open(dir.clone(), true, 7);
        session.engine.execute_training("strength");
        session.engine.add_xp(120);
        session.flush();
    }

    let session = Session::open(dir, true, 99);
    let state = &session.engine.state;
    assert_eq!(state.level, 2);
    assert_eq!(state.xp_to_level, 194);
    assert!(state.stats[&StatKey::Strength].value > 18);
    assert!(state.targets.is_some());
}
