use goose_game::highscore::*;

use tempfile::tempdir;

#[test]
fn absent_file_loads_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    assert_eq!(load_high_score(&path), 0);
    assert_eq!(HighscoreStore::open(&path).best(), 0);
}

#[test]
fn empty_or_garbage_file_loads_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    std::fs::write(&path, "").unwrap();
    assert_eq!(load_high_score(&path), 0);
    std::fs::write(&path, "goose").unwrap();
    assert_eq!(load_high_score(&path), 0);
}

#[test]
fn trailing_newline_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    std::fs::write(&path, "15\n").unwrap();
    assert_eq!(load_high_score(&path), 15);
}

#[test]
fn save_writes_plain_decimal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    save_high_score(&path, 7).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");
}

#[test]
fn record_only_writes_on_new_best() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");

    let mut store = HighscoreStore::open(&path);
    assert!(store.record(7).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");

    // A later, worse session leaves the file alone
    let mut store = HighscoreStore::open(&path);
    assert_eq!(store.best(), 7);
    assert!(!store.record(3).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");
    assert_eq!(store.best(), 7);
}

#[test]
fn tie_is_not_a_new_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    std::fs::write(&path, "5").unwrap();
    let mut store = HighscoreStore::open(&path);
    assert!(!store.record(5).unwrap());
}

#[test]
fn zero_score_never_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.txt");
    let mut store = HighscoreStore::open(&path);
    assert!(!store.record(0).unwrap());
    assert!(!path.exists());
}

#[test]
fn failed_write_still_raises_best_in_memory() {
    let dir = tempdir().unwrap();
    // Parent directory does not exist, so the write fails
    let path = dir.path().join("missing").join("highscore.txt");
    let mut store = HighscoreStore::open(&path);
    assert!(store.record(4).is_err());
    assert_eq!(store.best(), 4);
}
