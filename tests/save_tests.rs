//! File-backed persistence: atomic replacement, corrupt-save recovery, and
//! a full play-quit-resume cycle over a real file.

use pairmatch::core::{BoardGenerator, CardState, GameRules, Layout, PairId};
use pairmatch::save::{FileSaveStore, SaveService, SaveSnapshot, SaveStore};
use pairmatch::session::GameSession;

fn save_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("savegame.json")
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileSaveStore::new(save_path(&dir));

    assert_eq!(store.read().unwrap(), None);

    store.write(b"blob").unwrap();
    assert_eq!(store.read().unwrap().as_deref(), Some(&b"blob"[..]));

    store.write(b"replaced").unwrap();
    assert_eq!(store.read().unwrap().as_deref(), Some(&b"replaced"[..]));

    store.delete().unwrap();
    assert_eq!(store.read().unwrap(), None);
    // Deleting a missing save is not an error.
    store.delete().unwrap();
}

#[test]
fn test_file_store_leaves_no_tmp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_path(&dir);
    let mut store = FileSaveStore::new(&path);

    store.write(b"blob").unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("savegame.json")]);
}

#[test]
fn test_corrupt_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_path(&dir);
    std::fs::write(&path, b"{definitely not json").unwrap();

    let service = SaveService::new(FileSaveStore::new(&path));
    assert!(service.load().is_none());
}

#[test]
fn test_truncated_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_path(&dir);
    std::fs::write(&path, b"").unwrap();

    let service = SaveService::new(FileSaveStore::new(&path));
    assert!(service.load().is_none());
}

#[test]
fn test_snapshot_persists_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = SaveService::new(FileSaveStore::new(save_path(&dir)));

    let board = BoardGenerator::create(Layout::new(2, 3), 11).unwrap();
    let snapshot = SaveSnapshot::capture(&board, 320, 2, 7);
    service.save(&snapshot);

    let loaded = service.load().expect("snapshot present");
    assert_eq!(loaded.pair_ids, snapshot.pair_ids);
    assert_eq!(loaded.score, 320);
    assert_eq!(loaded.combo, 2);
    assert_eq!(loaded.tries_remaining, 7);
    assert!(loaded.is_compatible(Layout::new(2, 3)));
    assert!(loaded.saved_at_utc > 0);
}

#[test]
fn test_session_resume_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_path(&dir);

    let rules = GameRules::new()
        .with_preview(false, 0.0)
        .with_load_on_start(false);
    let mut session =
        GameSession::new(rules, Layout::new(2, 2), 42, FileSaveStore::new(&path)).unwrap();

    let pair0: Vec<_> = session
        .board()
        .card_ids()
        .filter(|&c| session.board().pair_id(c) == PairId::new(0))
        .collect();
    session.request_flip(pair0[0]);
    session.flip_completed(pair0[0], true);
    session.request_flip(pair0[1]);
    session.flip_completed(pair0[1], true);
    assert_eq!(session.score(), 100);
    drop(session);

    let rules = GameRules::new().with_preview(false, 0.0);
    let resumed =
        GameSession::new(rules, Layout::new(2, 2), 7, FileSaveStore::new(&path)).unwrap();
    assert_eq!(resumed.score(), 100);
    assert_eq!(resumed.board().state(pair0[0]), CardState::Matched);
}
