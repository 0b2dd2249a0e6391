use super::*;
use crate::config::NavigatorSettings;
use crate::inspector::fake::{FakePlayer, track};
use crate::tracker::CandidateSlot;
use std::sync::Arc;

fn instant_settings() -> NavigatorSettings {
    NavigatorSettings {
        settle_ms: 0,
        render_ms: 0,
        next_page_label: "next".to_string(),
    }
}

fn two_pages() -> FakePlayer {
    FakePlayer::new(vec![
        vec![
            track("Alpha", "Ann"),
            track("Beta", "Bob"),
            track("Gamma", "Cy"),
        ],
        vec![track("Delta", "Dee"), track("Epsilon", "Eve")],
    ])
}

fn navigator(player: &FakePlayer) -> (Navigator<FakePlayer>, CandidateSlot) {
    let slot = CandidateSlot::new();
    let mut nav = Navigator::new(Arc::new(player.clone()), slot.clone(), instant_settings());
    nav.refresh_catalog().unwrap();
    (nav, slot)
}

fn candidate_title(slot: &CandidateSlot) -> Option<String> {
    slot.snapshot().map(|r| r.title().to_string())
}

#[test]
fn listing_parses_title_artist_and_optional_genre() {
    let l = CatalogListing::parse("Album Name\nSome Artist\nelectronic");
    assert_eq!(l.title, "Album Name");
    assert_eq!(l.artist, "Some Artist");
    assert_eq!(l.genre.as_deref(), Some("electronic"));
    assert_eq!(l.to_string(), "Album Name by Some Artist (electronic)");

    let l = CatalogListing::parse("Only Title");
    assert_eq!(l.artist, "");
    assert_eq!(l.genre, None);
}

#[test]
fn refresh_keeps_only_items_inside_the_container() {
    let player = two_pages();
    let (nav, _) = navigator(&player);

    let titles: Vec<String> = nav.list_catalog().into_iter().map(|l| l.title).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(nav.selected(), None);
}

#[test]
fn select_valid_index_publishes_candidate() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);

    let outcome = nav.select(Some(2)).unwrap();
    assert_eq!(outcome, Navigation::Played { playing: true });
    assert_eq!(nav.selected(), Some(2));
    assert_eq!(player.loaded_title().as_deref(), Some("Beta"));

    let rec = slot.snapshot().unwrap();
    assert_eq!(rec.title(), "Beta");
    assert_eq!(rec.artist_url(), "https://bob.example.com");
    assert_eq!(rec.album_url(), "https://bob.example.com/album/beta");
}

#[test]
fn out_of_range_select_is_a_no_op() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);
    nav.select(Some(1)).unwrap();
    let activations = player.activations();

    assert_eq!(nav.select(Some(0)).unwrap(), Navigation::Ignored);
    assert_eq!(nav.select(Some(4)).unwrap(), Navigation::Ignored);

    assert_eq!(nav.selected(), Some(1));
    assert_eq!(candidate_title(&slot).as_deref(), Some("Alpha"));
    assert_eq!(player.activations(), activations);
}

#[test]
fn toggle_does_not_touch_candidate_when_it_stops_playback() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);
    nav.select(Some(3)).unwrap();

    assert_eq!(nav.toggle().unwrap(), Navigation::Played { playing: false });
    assert_eq!(candidate_title(&slot).as_deref(), Some("Gamma"));

    assert_eq!(nav.toggle().unwrap(), Navigation::Played { playing: true });
    assert_eq!(candidate_title(&slot).as_deref(), Some("Gamma"));
}

#[test]
fn metadata_failure_keeps_previous_candidate() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);
    nav.select(Some(1)).unwrap();

    player.fail_metadata(1);
    assert_eq!(nav.select(Some(2)).unwrap(), Navigation::Played { playing: true });
    assert_eq!(nav.selected(), Some(2));
    assert_eq!(candidate_title(&slot).as_deref(), Some("Alpha"));
}

#[test]
fn pause_and_resume_are_distinct_intents() {
    let player = two_pages();
    let (mut nav, _) = navigator(&player);

    // Nothing playing yet: pause is a no-op.
    assert_eq!(nav.pause().unwrap(), Navigation::Ignored);

    nav.select(Some(1)).unwrap();
    assert_eq!(nav.resume().unwrap(), Navigation::Ignored);
    assert_eq!(nav.pause().unwrap(), Navigation::Played { playing: false });
    assert_eq!(nav.pause().unwrap(), Navigation::Ignored);
    assert_eq!(nav.resume().unwrap(), Navigation::Played { playing: true });
}

#[test]
fn advance_catalog_matches_label_case_insensitively() {
    let player = two_pages();
    let (mut nav, _) = navigator(&player);
    nav.select(Some(2)).unwrap();

    assert_eq!(
        nav.advance_catalog("  NEXT ").unwrap(),
        Navigation::PageChanged { items: 2 }
    );
    assert_eq!(player.page(), 1);
    assert_eq!(nav.selected(), None);
    assert_eq!(nav.list_catalog()[0].title, "Delta");

    assert_eq!(nav.advance_catalog("7").unwrap(), Navigation::Ignored);
    assert_eq!(nav.catalog_len(), 2);

    assert_eq!(
        nav.advance_catalog("1").unwrap(),
        Navigation::PageChanged { items: 3 }
    );
    assert_eq!(player.page(), 0);
}

#[test]
fn play_next_stays_on_page_while_room_remains() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);

    nav.play_next().unwrap();
    assert_eq!(nav.selected(), Some(1));
    nav.play_next().unwrap();
    assert_eq!(nav.selected(), Some(2));
    assert_eq!(candidate_title(&slot).as_deref(), Some("Beta"));
    assert_eq!(player.advances(), 0);
}

#[test]
fn play_next_crosses_page_boundary_once() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);
    nav.select(Some(3)).unwrap();

    let outcome = nav.play_next().unwrap();
    assert_eq!(outcome, Navigation::Played { playing: true });
    assert_eq!(player.advances(), 1);
    assert_eq!(player.page(), 1);
    assert_eq!(nav.selected(), Some(1));
    assert_eq!(candidate_title(&slot).as_deref(), Some("Delta"));
}

#[test]
fn play_next_on_last_page_wraps_to_first_item() {
    let player = two_pages();
    let (mut nav, slot) = navigator(&player);
    nav.advance_catalog("next").unwrap();
    nav.select(Some(2)).unwrap();

    nav.play_next().unwrap();
    assert_eq!(player.advances(), 1);
    assert_eq!(nav.selected(), Some(1));
    assert_eq!(candidate_title(&slot).as_deref(), Some("Delta"));
}

#[test]
fn list_pages_reports_trimmed_labels() {
    let player = two_pages();
    let (nav, _) = navigator(&player);
    assert_eq!(nav.list_pages().unwrap(), vec!["1", "2", "Next"]);
}
