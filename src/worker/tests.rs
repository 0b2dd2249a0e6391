use super::*;
use crate::config::Settings;
use crate::inspector::fake::{FakePlayer, track};
use crate::session::Session;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn worker(player: &FakePlayer, dir: &std::path::Path) -> SessionWorker {
    let mut s = Settings::default();
    s.navigator.settle_ms = 0;
    s.navigator.render_ms = 0;
    s.tracker.poll_interval_secs = 3600;
    let session = Session::initialize(player.clone(), &dir.join("h.csv"), &s).unwrap();
    SessionWorker::spawn(session).unwrap()
}

fn wait_for(view: &ViewHandle, pred: impl Fn(&SessionView) -> bool) -> SessionView {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let v = view.lock().unwrap().clone();
        if pred(&v) || Instant::now() > deadline {
            return v;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn initial_view_shows_catalog() {
    let dir = tempdir().unwrap();
    let player = FakePlayer::new(vec![vec![track("Alpha", "Ann"), track("Beta", "Bob")]]);
    let w = worker(&player, dir.path());

    let v = w.view_handle().lock().unwrap().clone();
    assert_eq!(v.catalog.len(), 2);
    assert_eq!(v.selected, None);
    assert!(!v.busy);
    w.quit();
}

#[test]
fn select_updates_view_and_out_of_range_reports_message() {
    let dir = tempdir().unwrap();
    let player = FakePlayer::new(vec![vec![track("Alpha", "Ann"), track("Beta", "Bob")]]);
    let w = worker(&player, dir.path());
    let view = w.view_handle();

    w.send(SessionCmd::Select(Some(2))).unwrap();
    let v = wait_for(&view, |v| v.now_playing.is_some());
    assert_eq!(v.selected, Some(2));
    assert_eq!(v.playing.map(|p| p.playing), Some(true));
    assert_eq!(v.now_playing.as_ref().map(|r| r.title()), Some("Beta"));

    w.send(SessionCmd::Select(Some(9))).unwrap();
    let v = wait_for(&view, |v| v.message.as_deref() == Some("no track #9 on this page"));
    assert_eq!(v.message.as_deref(), Some("no track #9 on this page"));
    assert_eq!(v.selected, Some(2));

    w.send(SessionCmd::ListPages).unwrap();
    let v = wait_for(&view, |v| !v.pages.is_empty());
    assert_eq!(v.pages, vec!["1"]);
    w.quit();
}

#[test]
fn quit_closes_the_player() {
    let dir = tempdir().unwrap();
    let player = FakePlayer::new(vec![vec![track("Alpha", "Ann")]]);
    let w = worker(&player, dir.path());
    w.quit();
    assert!(player.is_closed());
}
