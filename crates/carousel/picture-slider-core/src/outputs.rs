//! Output contracts from the engine.
//!
//! Outputs carry the surface property assignments produced since the last
//! drain, in the order they were made. Adapters apply them to the host.

use serde::{Deserialize, Serialize};

use crate::geometry::FrameLayout;

/// Navigation affordance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrow {
    Previous,
    Next,
}

impl Arrow {
    /// Base class name of the arrow element.
    #[inline]
    pub fn class_name(self) -> &'static str {
        match self {
            Arrow::Previous => "ps-left",
            Arrow::Next => "ps-right",
        }
    }
}

/// One property assignment on the renderable surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceWrite {
    ContainerHeight {
        height: f32,
    },
    StripSize {
        width: f32,
        height: f32,
    },
    /// Horizontal offset of the strip in pixels.
    StripOffset {
        left: f32,
    },
    /// A frame was appended; the host builds its element tree once.
    FrameAppended {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Frame {
        layout: FrameLayout,
    },
    ControlsSize {
        width: f32,
        height: f32,
    },
    ControlsOpacity {
        opacity: f32,
    },
    /// Attach (`true`) or detach (`false`) the host's key listener.
    KeyboardFocus {
        active: bool,
    },
    /// Size-variant class for an arrow (`ps-left-medium`).
    ArrowClass {
        arrow: Arrow,
        class: String,
    },
    ArrowOpacity {
        arrow: Arrow,
        opacity: f32,
    },
    CaptionPanelOpacity {
        opacity: f32,
    },
    CaptionHeight {
        height: f32,
    },
    CaptionTextOpacity {
        opacity: f32,
    },
    CaptionText {
        text: String,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub writes: Vec<SurfaceWrite>,
}

impl Outputs {
    #[inline]
    pub fn push(&mut self, write: SurfaceWrite) {
        self.writes.push(write);
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Last strip offset written, if any.
    pub fn last_strip_offset(&self) -> Option<f32> {
        self.writes.iter().rev().find_map(|w| match w {
            SurfaceWrite::StripOffset { left } => Some(*left),
            _ => None,
        })
    }

    /// Last opacity written for `arrow`, if any.
    pub fn last_arrow_opacity(&self, arrow: Arrow) -> Option<f32> {
        self.writes.iter().rev().find_map(|w| match w {
            SurfaceWrite::ArrowOpacity { arrow: a, opacity } if *a == arrow => Some(*opacity),
            _ => None,
        })
    }

    /// Frame layouts in this batch, in write order.
    pub fn frames(&self) -> impl Iterator<Item = &FrameLayout> {
        self.writes.iter().filter_map(|w| match w {
            SurfaceWrite::Frame { layout } => Some(layout),
            _ => None,
        })
    }
}
