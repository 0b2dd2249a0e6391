use std::sync::Arc;

use crate::config::{BrowserSettings, SelectorSettings};
use crate::error::InspectError;
use crate::inspector::{PageInspector, Rect, Selectable};
use crate::track::TrackMetadata;

use super::client::WebDriver;

/// A DOM element in the driver's session.
pub struct WebElement {
    driver: Arc<WebDriver>,
    id: String,
}

impl Selectable for WebElement {
    fn activate(&self) -> Result<(), InspectError> {
        self.driver.click(&self.id)
    }

    fn text(&self) -> Result<String, InspectError> {
        self.driver.text(&self.id)
    }

    fn bounding_box(&self) -> Result<Rect, InspectError> {
        self.driver.rect(&self.id)
    }
}

/// The player page as seen through WebDriver.
pub struct SiteInspector {
    driver: Arc<WebDriver>,
    selectors: SelectorSettings,
}

impl SiteInspector {
    /// Open a browser session and load the player page.
    pub fn launch(settings: &BrowserSettings) -> Result<Self, InspectError> {
        let driver = WebDriver::connect(settings)?;
        driver.navigate(&settings.start_url)?;
        tracing::info!(url = %settings.start_url, "player page loaded");
        Ok(Self {
            driver: Arc::new(driver),
            selectors: settings.selectors.clone(),
        })
    }

    fn element(&self, id: String) -> WebElement {
        WebElement {
            driver: self.driver.clone(),
            id,
        }
    }

    /// Text and query-stripped link of the anchor matching `css`.
    fn link(&self, css: &str) -> Result<(String, String), InspectError> {
        let id = self.driver.find(css)?;
        let text = self.driver.text(&id)?;
        let href = self.driver.attribute(&id, "href")?.unwrap_or_default();
        Ok((text, href))
    }
}

/// Whether a `class` attribute value carries `class_name` as a token.
pub fn has_class(class_attr: &str, class_name: &str) -> bool {
    class_attr.split_whitespace().any(|c| c == class_name)
}

impl PageInspector for SiteInspector {
    type Item = WebElement;

    fn is_playing(&self) -> Result<bool, InspectError> {
        let button = self.driver.find(&self.selectors.play_button)?;
        let class = self.driver.attribute(&button, "class")?.unwrap_or_default();
        Ok(has_class(&class, &self.selectors.playing_class))
    }

    fn current_track_metadata(&self) -> Result<Option<TrackMetadata>, InspectError> {
        let title = match self.driver.find(&self.selectors.title) {
            Ok(id) => self.driver.text(&id)?,
            Err(InspectError::NoSuchElement(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let (album, album_url) = self.link(&self.selectors.album_link)?;
        let (artist, artist_url) = self.link(&self.selectors.artist_link)?;

        Ok(Some(TrackMetadata {
            title,
            artist,
            artist_url,
            album,
            album_url,
        }))
    }

    fn catalog_region(&self) -> Result<Rect, InspectError> {
        let region = self.driver.find(&self.selectors.catalog_region)?;
        self.driver.rect(&region)
    }

    fn catalog_items(&self) -> Result<Vec<WebElement>, InspectError> {
        Ok(self
            .driver
            .find_all(&self.selectors.catalog_item)?
            .into_iter()
            .map(|id| self.element(id))
            .collect())
    }

    fn page_controls(&self) -> Result<Vec<WebElement>, InspectError> {
        Ok(self
            .driver
            .find_all(&self.selectors.page_control)?
            .into_iter()
            .map(|id| self.element(id))
            .collect())
    }

    fn play_control(&self) -> Result<WebElement, InspectError> {
        let id = self.driver.find(&self.selectors.play_button)?;
        Ok(self.element(id))
    }

    fn close(&self) -> Result<(), InspectError> {
        self.driver.quit()
    }
}
