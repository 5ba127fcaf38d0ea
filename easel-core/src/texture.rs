//! Texture references and the stock-media provider boundary.
//!
//! The core never fetches imagery. A host searches its media provider,
//! gets back a [`SearchPage`], and hands the chosen [`Media`] to the core as a
//! [`TextureReference`]. Only the resolved URLs travel with the reference.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{EditError, EditResult};

/// Resolved URL set for one piece of stock media, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureUrls {
    /// Original upload.
    pub raw: String,
    /// Full resolution.
    pub full: String,
    /// Regular (~1080px) rendition.
    pub regular: String,
    /// Small (~400px) rendition, the one used on canvas.
    pub small: String,
    /// Thumbnail rendition.
    pub thumb: String,
}

/// Opaque handle to externally fetched imagery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureReference {
    /// Provider-assigned identifier.
    pub id: String,
    /// Resolved renditions.
    pub urls: TextureUrls,
    /// Dominant color reported by the provider, if any.
    #[serde(default)]
    pub color_hint: Option<Color>,
}

impl TextureReference {
    /// Create a reference from an id and its resolved URLs.
    #[must_use]
    pub fn new(id: impl Into<String>, urls: TextureUrls) -> Self {
        Self {
            id: id.into(),
            urls,
            color_hint: None,
        }
    }

    /// URL the canvas should display.
    #[must_use]
    pub fn display_url(&self) -> &str {
        &self.urls.small
    }

    /// Check the reference can be displayed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the id or display URL is empty.
    pub fn validate(&self) -> EditResult<()> {
        if self.id.is_empty() {
            return Err(EditError::invalid("texture", "empty id"));
        }
        if self.urls.small.is_empty() {
            return Err(EditError::invalid(
                "texture",
                format!("{} has no display url", self.id),
            ));
        }
        Ok(())
    }
}

/// URL set as returned by the media provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUrls {
    /// Original upload.
    #[serde(default)]
    pub raw: String,
    /// Full resolution.
    #[serde(default)]
    pub full: String,
    /// Regular rendition.
    #[serde(default)]
    pub regular: String,
    /// Small rendition.
    #[serde(default)]
    pub small: String,
    /// Thumbnail rendition.
    #[serde(default)]
    pub thumb: String,
}

/// One search result from the media provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Provider id.
    pub id: String,
    /// Dominant color as a hex string, e.g. `"#a6c0d9"`.
    #[serde(default)]
    pub color: Option<String>,
    /// Renditions.
    pub urls: MediaUrls,
}

impl From<&Media> for TextureReference {
    fn from(media: &Media) -> Self {
        Self {
            id: media.id.clone(),
            urls: TextureUrls {
                raw: media.urls.raw.clone(),
                full: media.urls.full.clone(),
                regular: media.urls.regular.clone(),
                small: media.urls.small.clone(),
                thumb: media.urls.thumb.clone(),
            },
            color_hint: media
                .color
                .as_deref()
                .and_then(|hex| Color::parse_hex(hex).ok()),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matches.
    #[serde(default)]
    pub total: u32,
    /// Number of pages available.
    #[serde(default)]
    pub total_pages: u32,
    /// Results on this page.
    #[serde(default)]
    pub results: Vec<Media>,
}

impl SearchPage {
    /// Convert every result into a texture reference.
    #[must_use]
    pub fn textures(&self) -> Vec<TextureReference> {
        self.results.iter().map(TextureReference::from).collect()
    }

    /// Whether a page after `page` exists.
    #[must_use]
    pub const fn has_more_after(&self, page: u32) -> bool {
        page < self.total_pages
    }
}

/// Parameters of a media search, as the host passes them to its provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaQuery {
    /// Provider category, e.g. `"illustrations"`.
    pub category: String,
    /// One-based page number.
    pub page: u32,
    /// Results per page.
    pub per_page: u32,
    /// `"portrait"`, `"landscape"` or `"squarish"`.
    pub orientation: String,
    /// Free-text query.
    pub query: String,
}

impl MediaQuery {
    /// The query used to populate texture rows.
    #[must_use]
    pub fn textures() -> Self {
        Self {
            category: "illustrations".to_string(),
            page: 1,
            per_page: 20,
            orientation: "portrait".to_string(),
            query: "texture pattern".to_string(),
        }
    }

    /// Same query, next page.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"{
        "total": 2,
        "total_pages": 1,
        "results": [
            {"id": "a1", "color": "#a6c0d9", "urls": {"raw": "r", "full": "f", "regular": "g", "small": "s", "thumb": "t"}},
            {"id": "b2", "urls": {"small": "s2"}}
        ]
    }"##;

    #[test]
    fn test_search_page_to_textures() {
        let page: SearchPage = serde_json::from_str(PAGE).expect("parse page");
        let textures = page.textures();
        assert_eq!(textures.len(), 2);
        assert_eq!(textures[0].display_url(), "s");
        assert_eq!(textures[0].color_hint, Some(Color::rgb(0xA6, 0xC0, 0xD9)));
        assert!(textures[1].color_hint.is_none());
        assert!(!page.has_more_after(1));
    }

    #[test]
    fn test_texture_validation() {
        let ok = TextureReference::new(
            "x",
            TextureUrls {
                small: "https://img/x-small".to_string(),
                ..TextureUrls::default()
            },
        );
        assert!(ok.validate().is_ok());
        assert!(TextureReference::new("y", TextureUrls::default())
            .validate()
            .is_err());
    }

    #[test]
    fn test_texture_query_paging() {
        let query = MediaQuery::textures();
        assert_eq!(query.per_page, 20);
        assert_eq!(query.next_page().page, 2);
        assert_eq!(query.next_page().query, "texture pattern");

        let last = MediaQuery {
            page: u32::MAX,
            ..MediaQuery::textures()
        };
        assert_eq!(last.next_page().page, u32::MAX);
    }
}
