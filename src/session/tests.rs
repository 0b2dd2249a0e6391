use super::*;
use crate::config::Settings;
use crate::error::{HistoryError, SessionError};
use crate::history::HistoryStore;
use crate::inspector::fake::{FakePlayer, track};
use crate::navigator::Navigation;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn settings() -> Settings {
    let mut s = Settings::default();
    s.navigator.settle_ms = 0;
    s.navigator.render_ms = 0;
    s.tracker.poll_interval_secs = 1;
    s
}

fn player() -> FakePlayer {
    FakePlayer::new(vec![
        vec![track("Alpha", "Ann"), track("Beta", "Bob")],
        vec![track("Gamma", "Cy")],
    ])
}

#[test]
fn initialize_reads_first_catalog_page() {
    let dir = tempdir().unwrap();
    let session = Session::initialize(player(), &dir.path().join("h.csv"), &settings()).unwrap();

    let titles: Vec<String> = session.list_catalog().into_iter().map(|l| l.title).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
    assert_eq!(session.list_pages().unwrap(), vec!["1", "2", "Next"]);
    assert!(session.now_playing().is_none());
    session.shutdown();
}

#[test]
fn initialize_fails_on_corrupt_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("h.csv");
    fs::write(
        &path,
        "title,artist,artist_url,album,album_url,observed_at\nonly,three,fields\n",
    )
    .unwrap();

    let fake = player();
    match Session::initialize(fake.clone(), &path, &settings()) {
        Err(e @ SessionError::History(HistoryError::CorruptRecord { found: 3, .. })) => {
            assert!(e.is_corruption());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("corrupt history must not start a session"),
    }
    assert!(fake.is_closed());
}

#[test]
fn unreadable_history_closes_the_player() {
    let dir = tempdir().unwrap();
    // A directory where the file should be cannot be read.
    let path = dir.path().join("h.csv");
    fs::create_dir(&path).unwrap();

    let fake = player();
    match Session::initialize(fake.clone(), &path, &settings()) {
        Err(SessionError::History(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unreadable history must not start a session"),
    }
    assert!(fake.is_closed());
}

#[test]
fn commands_drive_candidate_and_tracker_records_plays() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("h.csv");
    let fake = player();
    let mut session = Session::initialize(fake.clone(), &path, &settings()).unwrap();
    let status = session.tracker_status();

    assert_eq!(session.select(Some(5)).unwrap(), Navigation::Ignored);
    assert_eq!(
        session.select(Some(2)).unwrap(),
        Navigation::Played { playing: true }
    );
    assert_eq!(session.selected(), Some(2));
    assert_eq!(session.now_playing().unwrap().title(), "Beta");

    let deadline = Instant::now() + Duration::from_secs(10);
    while status.lock().unwrap().history_len == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
    }
    assert_eq!(status.lock().unwrap().history_len, 1);

    assert_eq!(session.pause().unwrap(), Navigation::Played { playing: false });
    assert_eq!(session.resume().unwrap(), Navigation::Played { playing: true });

    session.shutdown();
    assert!(fake.is_closed());

    let stored = HistoryStore::new(&path).load().unwrap();
    assert!(!stored.is_empty());
    assert!(stored.iter().all(|r| r.title() == "Beta"));
}

#[test]
fn play_next_and_advance_go_through_the_session() {
    let dir = tempdir().unwrap();
    let fake = player();
    let mut session = Session::initialize(fake.clone(), &dir.path().join("h.csv"), &settings()).unwrap();

    session.select(Some(2)).unwrap();
    session.play_next().unwrap();
    assert_eq!(fake.advances(), 1);
    assert_eq!(session.now_playing().unwrap().title(), "Gamma");

    assert_eq!(
        session.advance_catalog("1").unwrap(),
        Navigation::PageChanged { items: 2 }
    );
    assert_eq!(session.selected(), None);
    assert_eq!(session.refresh_catalog().unwrap().len(), 2);
    assert_eq!(session.toggle().unwrap(), Navigation::Played { playing: false });
    session.shutdown();
}
