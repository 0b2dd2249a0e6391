use std::fmt;

/// Human-readable summary of one catalog item, parsed from its text.
///
/// Line 1 is the title, line 2 the artist, an optional line 3 the genre.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogListing {
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
}

impl CatalogListing {
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let title = lines.next().unwrap_or_default().to_string();
        let artist = lines.next().unwrap_or_default().to_string();
        let genre = lines.next().map(str::to_string);
        Self {
            title,
            artist,
            genre,
        }
    }
}

impl fmt::Display for CatalogListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.artist.is_empty() {
            write!(f, " by {}", self.artist)?;
        }
        if let Some(g) = &self.genre {
            write!(f, " ({g})")?;
        }
        Ok(())
    }
}

/// A selectable catalog item together with its parsed listing.
pub struct CatalogEntry<T> {
    pub(super) item: T,
    pub listing: CatalogListing,
}

impl<T> CatalogEntry<T> {
    pub fn new(item: T, listing: CatalogListing) -> Self {
        Self { item, listing }
    }
}

/// The current page's catalog, in page order.
pub type CatalogSnapshot<T> = Vec<CatalogEntry<T>>;
