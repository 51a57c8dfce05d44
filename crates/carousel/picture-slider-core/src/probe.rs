//! Measurement capabilities the host surface provides to the engine.

use serde::{Deserialize, Serialize};

/// Pixel size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// width / height, or `None` when the ratio is not meaningful.
    #[inline]
    pub fn aspect(&self) -> Option<f32> {
        let a = self.width / self.height;
        (a.is_finite() && a > 0.0).then_some(a)
    }
}

/// Per-side pixel lengths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Computed box of a rich-content element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxMetrics {
    pub width: f32,
    pub height: f32,
    pub padding: Edges,
    pub margin: Edges,
}

/// Host-side measurement hooks.
///
/// Implementations query the real surface (computed styles, hidden probe
/// elements). They are called from the single event context that drives the
/// carousel.
pub trait SurfaceProbe {
    /// Natural height the caption panel would have when showing `text` at the
    /// given viewport width. Measured on a hidden, identically styled clone.
    fn caption_height(&mut self, text: &str, viewport_width: u32) -> f32;

    /// Computed box of frame `index`'s rich-content child.
    fn content_box(&mut self, index: usize) -> Option<BoxMetrics>;
}

/// Probe for headless use: captions measure zero, content is unmeasured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProbe;

impl SurfaceProbe for NullProbe {
    fn caption_height(&mut self, _text: &str, _viewport_width: u32) -> f32 {
        0.0
    }

    fn content_box(&mut self, _index: usize) -> Option<BoxMetrics> {
        None
    }
}
