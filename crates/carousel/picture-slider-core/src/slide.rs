//! Slide descriptors and the append-only registry that owns them.

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// One slide. Every part is optional; a slide may carry an image, rich
/// content, both, or neither.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slide {
    /// Image reference handed to the host as-is.
    #[serde(rename = "src", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Markup rendered inside the frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Navigation target; turns the frame into a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Per-slide centering override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Slide {
    pub fn image(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn content(markup: impl Into<String>) -> Self {
        Self {
            content: Some(markup.into()),
            ..Self::default()
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = Some(center);
        self
    }

    /// Effective centering given the carousel-wide default.
    #[inline]
    pub fn centered(&self, default_center: bool) -> bool {
        self.center.unwrap_or(default_center)
    }
}

/// Parse a JSON array of slide descriptors.
pub fn parse_slides_json(json: &str) -> Result<Vec<Slide>> {
    serde_json::from_str(json).map_err(CarouselError::SlidesJson)
}

/// Ordered slide storage. Slides can only be appended.
#[derive(Debug, Default)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
}

impl SlideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide, returning its index.
    pub fn append(&mut self, slide: Slide) -> usize {
        self.slides.push(slide);
        self.slides.len() - 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the last slide, if any.
    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.slides.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_sequential_indices() {
        let mut reg = SlideRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.last_index(), None);
        assert_eq!(reg.append(Slide::image("a.jpg")), 0);
        assert_eq!(reg.append(Slide::content("<p>b</p>")), 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.last_index(), Some(1));
        assert_eq!(reg.get(0).and_then(|s| s.source.as_deref()), Some("a.jpg"));
        assert!(reg.get(2).is_none());
    }

    #[test]
    fn slides_parse_with_original_field_names() {
        let slides = parse_slides_json(
            r#"[
                { "src": "a.jpg", "caption": "First", "center": false },
                { "content": "<b>hi</b>", "link": "https://example.com" },
                {}
            ]"#,
        )
        .unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].source.as_deref(), Some("a.jpg"));
        assert!(!slides[0].centered(true));
        assert!(slides[1].centered(true));
        assert_eq!(slides[1].link.as_deref(), Some("https://example.com"));
        assert_eq!(slides[2], Slide::default());
    }

    #[test]
    fn malformed_slides_json_is_reported() {
        let err = parse_slides_json(r#"{ "src": "a.jpg" }"#).unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
