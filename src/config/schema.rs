use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playlog/config.toml` or `~/.config/playlog/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYLOG__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub history: HistorySettings,
    pub tracker: TrackerSettings,
    pub navigator: NavigatorSettings,
    pub browser: BrowserSettings,
    pub logging: LoggingSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Where the CSV history lives. Unset means the XDG data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Pause between two reconciliation cycles (seconds).
    pub poll_interval_secs: u64,
    /// How many recent plays the tracker publishes to the UI.
    pub recent_limit: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 20,
            recent_limit: 50,
        }
    }
}

impl TrackerSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Wait after clicking before asking whether playback started (milliseconds).
    pub settle_ms: u64,
    /// Wait for the catalog to finish rendering before reading it (milliseconds).
    pub render_ms: u64,
    /// Label of the page control that advances the catalog.
    pub next_page_label: String,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            settle_ms: 500,
            render_ms: 1000,
            next_page_label: "next".to_string(),
        }
    }
}

impl NavigatorSettings {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn render(&self) -> Duration {
        Duration::from_millis(self.render_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Base URL of a running W3C WebDriver server (geckodriver).
    pub webdriver_url: String,
    /// Page holding the player and catalog.
    pub start_url: String,
    /// Run the browser without a window.
    pub headless: bool,
    /// Per-request timeout for driver calls (milliseconds).
    pub request_timeout_ms: u64,
    pub selectors: SelectorSettings,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            start_url: "https://bandcamp.com/".to_string(),
            headless: true,
            request_timeout_ms: 10_000,
            selectors: SelectorSettings::default(),
        }
    }
}

impl BrowserSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// CSS selectors describing the player page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub play_button: String,
    /// Class present on the play button while playing.
    pub playing_class: String,
    pub title: String,
    pub album_link: String,
    pub artist_link: String,
    pub catalog_region: String,
    pub catalog_item: String,
    pub page_control: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            play_button: ".playbutton".to_string(),
            playing_class: "playing".to_string(),
            title: ".title".to_string(),
            album_link: ".detail-album > a".to_string(),
            artist_link: ".detail-artist > a".to_string(),
            catalog_region: ".discover-results".to_string(),
            catalog_item: ".discover-item".to_string(),
            page_control: ".item-page".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
    /// Directory for the rolling log file. Unset means the XDG state directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ what you played, kept ~ ".to_string(),
        }
    }
}
