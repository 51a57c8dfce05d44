//! Drag controller: direct manipulation of the strip by pointer or touch.
//!
//! A drag preempts any strip animation. Moves shift the strip by the delta
//! since the previous move. On release the displacement from the committed
//! frame, in viewport widths, decides between the neighbours and a snap back.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::CarouselGeometry;
use crate::outputs::Outputs;
use crate::transition::TransitionController;

/// Fraction of the viewport width a release must exceed to change slides.
pub const COMMIT_THRESHOLD: f32 = 0.25;

/// Live gesture bookkeeping. Exists only between start and stop.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub start_pointer_x: f32,
    pub origin_offset_at_start: f32,
    pub last_pointer_x: f32,
}

impl DragSession {
    pub fn new(pointer_x: f32, origin_offset: f32) -> Self {
        Self {
            start_pointer_x: pointer_x,
            origin_offset_at_start: origin_offset,
            last_pointer_x: pointer_x,
        }
    }

    /// Total pointer travel since the gesture began.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.last_pointer_x - self.start_pointer_x
    }

    /// Strip movement since the gesture began. Differs from `travel` once a
    /// resize has rebased the strip mid-drag.
    #[inline]
    pub fn strip_delta(&self, strip_offset: f32) -> f32 {
        strip_offset - self.origin_offset_at_start
    }
}

/// A pointer sample. Mouse and touch collapse to one X stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerInput {
    Mouse { client_x: f32 },
    /// Client X of each active touch; only the first is tracked.
    Touch { touches: Vec<f32> },
}

impl PointerInput {
    pub fn primary_x(&self) -> Option<f32> {
        let x = match self {
            PointerInput::Mouse { client_x } => Some(*client_x),
            PointerInput::Touch { touches } => touches.first().copied(),
        };
        x.filter(|x| x.is_finite())
    }
}

/// Outcome of releasing a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragResolution {
    /// Strip pulled right past the threshold: go to the previous slide.
    Previous,
    /// Strip pulled left past the threshold: go to the next slide.
    Next,
    SnapBack,
}

#[derive(Debug, Clone)]
pub struct DragController {
    threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            threshold: COMMIT_THRESHOLD,
        }
    }
}

impl DragController {
    /// Begin a session. Returns false when one is already active.
    pub fn start(&self, nav: &mut TransitionController, pointer_x: f32) -> bool {
        if nav.is_dragging() {
            return false;
        }
        let origin = nav.strip_offset();
        nav.enter_drag(DragSession::new(pointer_x, origin));
        debug!("drag started at x={pointer_x} from offset {origin}");
        true
    }

    /// Shift the strip by the movement since the last sample.
    pub fn move_to(
        &self,
        nav: &mut TransitionController,
        pointer_x: f32,
        out: &mut Outputs,
    ) -> bool {
        let dx = match nav.drag_session_mut() {
            Some(session) => {
                let dx = pointer_x - session.last_pointer_x;
                session.last_pointer_x = pointer_x;
                dx
            }
            None => return false,
        };
        let left = nav.strip_offset() + dx;
        nav.set_strip_offset(left, out);
        true
    }

    /// End the session and decide where to go. `None` if no session was active.
    pub fn stop(
        &self,
        nav: &mut TransitionController,
        geometry: &CarouselGeometry,
    ) -> Option<DragResolution> {
        let session = nav.leave_drag()?;
        let offset = nav.strip_offset();
        let resolution = self.resolve(offset, nav.current().unwrap_or(0), geometry);
        debug!(
            "drag released after {} px of travel, strip moved {} px: {resolution:?}",
            session.travel(),
            session.strip_delta(offset)
        );
        Some(resolution)
    }

    /// Classify a strip offset relative to the committed frame.
    pub fn resolve(
        &self,
        strip_offset: f32,
        current: usize,
        geometry: &CarouselGeometry,
    ) -> DragResolution {
        if geometry.viewport_width == 0 {
            return DragResolution::SnapBack;
        }
        let width = geometry.width();
        let pos = (strip_offset + current as f32 * width) / width;
        if pos > self.threshold {
            DragResolution::Previous
        } else if pos < -self.threshold {
            DragResolution::Next
        } else {
            DragResolution::SnapBack
        }
    }
}
