use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone};

/// Column names of the history file, in storage order.
pub const FIELDS: [&str; 6] = [
    "title",
    "artist",
    "artist_url",
    "album",
    "album_url",
    "observed_at",
];

/// Strip the query string from a link so tracking parameters do not
/// defeat dedup.
pub fn canonical_url(url: &str) -> String {
    url.split('?').next().unwrap_or_default().trim().to_string()
}

/// `ctime(3)` layout, e.g. `Sat Oct 17 12:00:00 2026`, read as local time.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Format an observation time the way it is stored on disk.
pub fn format_observed_at(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse a stored timestamp: RFC 3339 in any of its spellings, or a
/// `ctime` string as written by older history files.
pub fn parse_observed_at(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts);
    }
    let naive = NaiveDateTime::parse_from_str(value, CTIME_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.fixed_offset())
}

/// Track details as reported by the player, before an observation time
/// is attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub artist_url: String,
    pub album: String,
    pub album_url: String,
}

impl TrackMetadata {
    /// Stamp the metadata with the current local time.
    pub fn observed_now(self) -> TrackRecord {
        self.observed_at(Local::now().fixed_offset())
    }

    /// Stamp the metadata with `ts` (sub-second precision is dropped so the
    /// record survives a save/load cycle unchanged).
    pub fn observed_at(self, ts: DateTime<FixedOffset>) -> TrackRecord {
        let ts = ts.trunc_subsecs(0);
        TrackRecord {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            artist_url: canonical_url(&self.artist_url),
            album: self.album.trim().to_string(),
            album_url: canonical_url(&self.album_url),
            observed_at: ts,
            observed_at_text: format_observed_at(&ts),
        }
    }
}

/// One observed play. Immutable once built.
///
/// Equality compares the five fields and the observation instant; the
/// stored spelling of the timestamp does not take part.
#[derive(Debug, Clone)]
pub struct TrackRecord {
    title: String,
    artist: String,
    artist_url: String,
    album: String,
    album_url: String,
    observed_at: DateTime<FixedOffset>,
    /// Timestamp text as it goes to disk, kept verbatim for loaded rows.
    observed_at_text: String,
}

impl PartialEq for TrackRecord {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.artist == other.artist
            && self.artist_url == other.artist_url
            && self.album == other.album
            && self.album_url == other.album_url
            && self.observed_at == other.observed_at
    }
}

impl Eq for TrackRecord {}

impl TrackRecord {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn artist_url(&self) -> &str {
        &self.artist_url
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn album_url(&self) -> &str {
        &self.album_url
    }

    pub fn observed_at(&self) -> DateTime<FixedOffset> {
        self.observed_at
    }

    /// Row representation in `FIELDS` order.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.title.clone(),
            self.artist.clone(),
            self.artist_url.clone(),
            self.album.clone(),
            self.album_url.clone(),
            self.observed_at_text.clone(),
        ]
    }

    /// Rebuild a record from stored columns. Values are taken verbatim,
    /// including the timestamp text, which is also parsed with
    /// `parse_observed_at`. Returns `None` for a bad timestamp.
    pub fn from_row(
        title: &str,
        artist: &str,
        artist_url: &str,
        album: &str,
        album_url: &str,
        observed_at: &str,
    ) -> Option<Self> {
        let parsed = parse_observed_at(observed_at)?;
        Some(Self {
            title: title.to_string(),
            artist: artist.to_string(),
            artist_url: artist_url.to_string(),
            album: album.to_string(),
            album_url: album_url.to_string(),
            observed_at: parsed,
            observed_at_text: observed_at.to_string(),
        })
    }

    /// `"Artist - Title"`, falling back to the title alone.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())?;
        if !self.album.trim().is_empty() {
            write!(f, " [{}]", self.album)?;
        }
        Ok(())
    }
}
