//! Scripted in-memory player used by unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::InspectError;
use crate::track::TrackMetadata;

use super::{PageInspector, Rect, Selectable};

const REGION: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1000.0,
    height: 300.0,
};

#[derive(Debug, Clone)]
pub struct FakeTrack {
    pub meta: TrackMetadata,
    pub genre: Option<String>,
}

pub fn track(title: &str, artist: &str) -> FakeTrack {
    let slug = title.to_ascii_lowercase().replace(' ', "-");
    FakeTrack {
        meta: TrackMetadata {
            title: title.to_string(),
            artist: artist.to_string(),
            artist_url: format!("https://{}.example.com?from=discover", artist.to_ascii_lowercase()),
            album: format!("{title} LP"),
            album_url: format!(
                "https://{}.example.com/album/{slug}?from=discover",
                artist.to_ascii_lowercase()
            ),
        },
        genre: Some("ambient".to_string()),
    }
}

#[derive(Debug, Default)]
struct FakeState {
    pages: Vec<Vec<FakeTrack>>,
    page: usize,
    loaded: Option<TrackMetadata>,
    playing: bool,
    play_state_failures: usize,
    metadata_failures: usize,
    activations: usize,
    advances: usize,
    closed: bool,
}

/// A player with paged catalog, a play toggle and failure injection.
#[derive(Debug, Clone, Default)]
pub struct FakePlayer {
    state: Arc<Mutex<FakeState>>,
}

impl FakePlayer {
    pub fn new(pages: Vec<Vec<FakeTrack>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                pages,
                ..FakeState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn set_playing(&self, playing: bool) {
        self.lock().playing = playing;
    }

    /// Make the next `n` play-state reads fail.
    pub fn fail_play_state(&self, n: usize) {
        self.lock().play_state_failures = n;
    }

    /// Make the next `n` metadata reads fail.
    pub fn fail_metadata(&self, n: usize) {
        self.lock().metadata_failures = n;
    }

    pub fn activations(&self) -> usize {
        self.lock().activations
    }

    pub fn advances(&self) -> usize {
        self.lock().advances
    }

    pub fn page(&self) -> usize {
        self.lock().page
    }

    pub fn loaded_title(&self) -> Option<String> {
        self.lock().loaded.as_ref().map(|m| m.title.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

#[derive(Debug, Clone)]
enum Target {
    Catalog(TrackMetadata),
    Page(String),
    PlayButton,
}

pub struct FakeItem {
    player: FakePlayer,
    target: Target,
    text: String,
    rect: Rect,
}

impl Selectable for FakeItem {
    fn activate(&self) -> Result<(), InspectError> {
        let mut s = self.player.lock();
        if s.closed {
            return Err(InspectError::Unavailable("closed".into()));
        }
        s.activations += 1;
        match &self.target {
            Target::Catalog(meta) => {
                s.loaded = Some(meta.clone());
                s.playing = true;
            }
            Target::Page(label) => {
                let next = if label == "next" {
                    s.page + 1
                } else {
                    label.parse::<usize>().unwrap_or(1).saturating_sub(1)
                };
                if next < s.pages.len() {
                    s.page = next;
                    s.advances += 1;
                }
            }
            Target::PlayButton => {
                if s.loaded.is_some() {
                    s.playing = !s.playing;
                }
            }
        }
        Ok(())
    }

    fn text(&self) -> Result<String, InspectError> {
        Ok(self.text.clone())
    }

    fn bounding_box(&self) -> Result<Rect, InspectError> {
        Ok(self.rect)
    }
}

impl PageInspector for FakePlayer {
    type Item = FakeItem;

    fn is_playing(&self) -> Result<bool, InspectError> {
        let mut s = self.lock();
        if s.play_state_failures > 0 {
            s.play_state_failures -= 1;
            return Err(InspectError::Unavailable("scripted play-state failure".into()));
        }
        Ok(s.playing)
    }

    fn current_track_metadata(&self) -> Result<Option<TrackMetadata>, InspectError> {
        let mut s = self.lock();
        if s.metadata_failures > 0 {
            s.metadata_failures -= 1;
            return Err(InspectError::NoSuchElement(".title".into()));
        }
        Ok(s.loaded.clone())
    }

    fn catalog_region(&self) -> Result<Rect, InspectError> {
        Ok(REGION)
    }

    fn catalog_items(&self) -> Result<Vec<FakeItem>, InspectError> {
        let s = self.lock();
        let Some(tracks) = s.pages.get(s.page) else {
            return Ok(Vec::new());
        };

        let item = |t: &FakeTrack, x: f64| {
            let mut text = format!("{}\n{}", t.meta.title, t.meta.artist);
            if let Some(g) = &t.genre {
                text.push('\n');
                text.push_str(g);
            }
            FakeItem {
                player: self.clone(),
                target: Target::Catalog(t.meta.clone()),
                text,
                rect: Rect {
                    x,
                    y: 10.0,
                    width: 90.0,
                    height: 90.0,
                },
            }
        };

        // Carousel neighbours rendered just outside the container.
        let mut items = Vec::new();
        if let Some(first) = tracks.first() {
            items.push(item(first, REGION.x - 100.0));
        }
        for (i, t) in tracks.iter().enumerate() {
            items.push(item(t, REGION.x + 10.0 + 100.0 * i as f64));
        }
        if let Some(last) = tracks.last() {
            items.push(item(last, REGION.x + REGION.width));
        }
        Ok(items)
    }

    fn page_controls(&self) -> Result<Vec<FakeItem>, InspectError> {
        let s = self.lock();
        let mut labels: Vec<String> = (1..=s.pages.len()).map(|n| n.to_string()).collect();
        if s.page + 1 < s.pages.len() {
            labels.push(" Next ".to_string());
        }
        Ok(labels
            .into_iter()
            .map(|label| FakeItem {
                player: self.clone(),
                target: Target::Page(label.trim().to_ascii_lowercase()),
                text: label,
                rect: Rect::default(),
            })
            .collect())
    }

    fn play_control(&self) -> Result<FakeItem, InspectError> {
        Ok(FakeItem {
            player: self.clone(),
            target: Target::PlayButton,
            text: String::new(),
            rect: Rect::default(),
        })
    }

    fn close(&self) -> Result<(), InspectError> {
        self.lock().closed = true;
        Ok(())
    }
}
