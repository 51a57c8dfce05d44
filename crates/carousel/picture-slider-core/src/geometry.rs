//! Viewport geometry and per-frame layout.
//!
//! The aspect ratio is captured once from the container's initial size. Every
//! later resize only supplies a width; the height follows from the ratio.

use serde::{Deserialize, Serialize};

use crate::probe::{BoxMetrics, Size};
use crate::slide::Slide;

/// Pixel metrics of the viewport. Rebuilt wholesale on every resize.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselGeometry {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub aspect_ratio: f32,
}

impl CarouselGeometry {
    #[inline]
    pub fn width(&self) -> f32 {
        self.viewport_width as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.viewport_height as f32
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.viewport_width == 0 || self.viewport_height == 0
    }

    /// Strip offset that reveals frame `index`.
    #[inline]
    pub fn offset_for(&self, index: usize) -> f32 {
        -(index as f32) * self.width()
    }

    fn viewport_aspect(&self) -> Option<f32> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.width() / self.height())
        }
    }
}

/// Which image dimension is pinned to the viewport; the other is `auto`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    Width,
    Height,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageLayout {
    pub fit: ImageFit,
    /// Rendered size after fitting.
    pub width: f32,
    pub height: f32,
    /// Set only when centering on the horizontal axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    /// Set only when centering on the vertical axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentLayout {
    /// Uniform scale relative to the original container width.
    pub scale: f32,
    pub left: f32,
    /// Set only when centering and the content fits vertically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
}

/// Position and size of one frame and its children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub index: usize,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentLayout>,
}

#[derive(Debug, Clone)]
pub struct GeometryManager {
    aspect: f32,
    original_width: f32,
    center: bool,
}

impl GeometryManager {
    /// Capture the aspect ratio and reference width from the container's
    /// initial size. A degenerate size yields aspect 0 (zero-height layout).
    pub fn new(initial: Size, center: bool) -> Self {
        let original_width = if initial.width.is_finite() && initial.width > 0.0 {
            initial.width
        } else {
            0.0
        };
        Self {
            aspect: initial.aspect().unwrap_or(0.0),
            original_width,
            center,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn compute(&self, container_width: f32) -> CarouselGeometry {
        let viewport_width = if container_width.is_finite() && container_width > 0.0 {
            container_width.round() as u32
        } else {
            0
        };
        let viewport_height = if self.aspect > 0.0 {
            (viewport_width as f32 / self.aspect).round() as u32
        } else {
            0
        };
        CarouselGeometry {
            viewport_width,
            viewport_height,
            aspect_ratio: self.aspect,
        }
    }

    pub fn layout_frame(
        &self,
        index: usize,
        slide: &Slide,
        geometry: &CarouselGeometry,
        image: Option<Size>,
        content: Option<BoxMetrics>,
    ) -> FrameLayout {
        let center = slide.centered(self.center);
        FrameLayout {
            index,
            left: index as f32 * geometry.width(),
            width: geometry.width(),
            height: geometry.height(),
            image: slide
                .source
                .as_ref()
                .and(image)
                .and_then(|natural| self.layout_image(natural, geometry, center)),
            // Unmeasured content stays unpositioned until the host reports it ready.
            content: slide
                .content
                .as_ref()
                .and(content)
                .map(|metrics| self.layout_content(metrics, geometry, center)),
        }
    }

    /// Fit an image inside the viewport by its limiting dimension.
    pub fn layout_image(
        &self,
        natural: Size,
        geometry: &CarouselGeometry,
        center: bool,
    ) -> Option<ImageLayout> {
        let image_aspect = natural.aspect()?;
        let (vw, vh) = (geometry.width(), geometry.height());
        let fit = match geometry.viewport_aspect() {
            Some(viewport_aspect) if image_aspect <= viewport_aspect => ImageFit::Height,
            _ => ImageFit::Width,
        };
        let (width, height) = match fit {
            ImageFit::Width => (vw, vw / image_aspect),
            ImageFit::Height => (vh * image_aspect, vh),
        };
        let (left, top) = match (center, fit) {
            (false, _) => (None, None),
            (true, ImageFit::Width) => (None, Some((vh - height) / 2.0)),
            (true, ImageFit::Height) => (Some((vw - width) / 2.0), None),
        };
        Some(ImageLayout {
            fit,
            width,
            height,
            left,
            top,
        })
    }

    /// Scale rich content with the viewport and center it.
    pub fn layout_content(
        &self,
        metrics: BoxMetrics,
        geometry: &CarouselGeometry,
        center: bool,
    ) -> ContentLayout {
        let scale = if self.original_width > 0.0 {
            geometry.width() / self.original_width
        } else {
            1.0
        };
        let left = (geometry.width()
            - metrics.width
            - metrics.padding.horizontal()
            - metrics.margin.horizontal())
            / 2.0;
        // Never push content above the top edge.
        let top = if center {
            let top = (geometry.height()
                - metrics.height
                - metrics.padding.vertical()
                - metrics.margin.vertical())
                / 2.0;
            (top >= 0.0).then_some(top)
        } else {
            None
        };
        ContentLayout { scale, left, top }
    }
}
