//! Portfolio previews: live thumbnails of client sites inside each card and a
//! full-size lightbox opened by clicking a card.

pub mod dom;
pub mod geometry;
pub mod live;
pub mod modal;

use geometry::Size;

pub const DEFAULT_PREVIEW_TITLE: &str = "Aperçu du projet";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    /// Resolution the live thumbnails render the remote page at.
    pub virtual_resolution: Size,
    /// Total fit attempts after load, one per animation frame.
    pub max_fit_attempts: u32,
    /// Fallback for overlays whose close transition never reports completion.
    pub close_fallback_ms: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            virtual_resolution: Size::new(1920.0, 1080.0),
            max_fit_attempts: 6,
            close_fallback_ms: 350,
        }
    }
}

/// Position of a card in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTarget {
    url: String,
    title: String,
}

impl PreviewTarget {
    /// Builds a target from the raw card attributes. Cards without a URL are
    /// not previewable.
    pub fn from_attributes(url: Option<String>, title: Option<String>) -> Option<Self> {
        let url = url?.trim().to_string();
        if url.is_empty() {
            return None;
        }
        let title = title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_PREVIEW_TITLE.to_string());
        Some(Self { url, title })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}
