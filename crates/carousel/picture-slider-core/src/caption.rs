//! Caption synchronizer: two-phase collapse/expand keyed to text changes.
//!
//! Phase 1 collapses the panel and fades the old text out. Only when it
//! completes is the new text swapped in, measured, and expanded. An empty
//! caption stops after phase 1.

use hashbrown::HashMap;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::outputs::{Outputs, SurfaceWrite};
use crate::probe::SurfaceProbe;
use crate::tween::{Tween, TweenStep};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPhase {
    #[default]
    Idle,
    Collapsing,
    Expanding,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionAnimationState {
    pub phase: CaptionPhase,
    /// Text applied at the collapse → expand boundary.
    pub pending_text: Option<String>,
}

#[derive(Debug)]
pub struct CaptionSynchronizer {
    state: CaptionAnimationState,
    visible_text: String,
    height: Tween,
    text_opacity: Tween,
    duration_ms: f32,
    /// Natural heights by text, valid for `measured_width` only.
    measured: HashMap<String, f32>,
    measured_width: u32,
}

impl CaptionSynchronizer {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            state: CaptionAnimationState::default(),
            visible_text: String::new(),
            height: Tween::settled(0.0),
            text_opacity: Tween::settled(0.0),
            duration_ms,
            measured: HashMap::new(),
            measured_width: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &CaptionAnimationState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> CaptionPhase {
        self.state.phase
    }

    /// Text currently shown in the panel.
    #[inline]
    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height.value()
    }

    #[inline]
    pub fn text_opacity(&self) -> f32 {
        self.text_opacity.value()
    }

    /// Start showing `text`. Any caption animation in flight is stopped in
    /// place and its pending swap discarded.
    pub fn set_caption(&mut self, text: Option<&str>) {
        self.height.stop();
        self.text_opacity.stop();
        self.state = CaptionAnimationState {
            phase: CaptionPhase::Collapsing,
            pending_text: text.filter(|t| !t.is_empty()).map(str::to_owned),
        };
        self.height.start(0.0, self.duration_ms);
        self.text_opacity.start(0.0, self.duration_ms);
    }

    /// Drop cached measurements; the next expand measures again.
    pub fn invalidate_measurements(&mut self) {
        self.measured.clear();
    }

    /// Refit the panel to the visible text after a width change.
    ///
    /// A settled panel snaps to the new natural height. A running expand is
    /// retargeted from where it is. A collapse already heads to 0.
    pub fn relayout(
        &mut self,
        viewport_width: u32,
        probe: &mut dyn SurfaceProbe,
        out: &mut Outputs,
    ) {
        if self.visible_text.is_empty() {
            return;
        }
        let text = self.visible_text.clone();
        match self.state.phase {
            CaptionPhase::Idle => {
                let height = self.measure(&text, viewport_width, probe);
                self.height.jump_to(height);
                out.push(SurfaceWrite::CaptionHeight { height });
            }
            CaptionPhase::Expanding if self.height.is_running() => {
                let height = self.measure(&text, viewport_width, probe);
                self.height.start(height, self.duration_ms);
            }
            _ => {}
        }
    }

    pub fn step(
        &mut self,
        dt_ms: f32,
        viewport_width: u32,
        probe: &mut dyn SurfaceProbe,
        out: &mut Outputs,
    ) {
        let height = self.height.step(dt_ms);
        match height {
            TweenStep::Running(h) | TweenStep::Completed(h) => {
                out.push(SurfaceWrite::CaptionHeight { height: h })
            }
            TweenStep::Idle => {}
        }
        match self.text_opacity.step(dt_ms) {
            TweenStep::Running(o) | TweenStep::Completed(o) => {
                out.push(SurfaceWrite::CaptionTextOpacity { opacity: o })
            }
            TweenStep::Idle => {}
        }
        if matches!(height, TweenStep::Completed(_)) {
            if let Some(text) = self.finish_phase(viewport_width, probe) {
                out.push(SurfaceWrite::CaptionText { text });
            }
        }
    }

    /// Advance past a completed phase. Returns the text to place in the
    /// panel when the boundary swaps it.
    fn finish_phase(
        &mut self,
        viewport_width: u32,
        probe: &mut dyn SurfaceProbe,
    ) -> Option<String> {
        match self.state.phase {
            CaptionPhase::Collapsing => match self.state.pending_text.take() {
                Some(text) => {
                    let target = self.measure(&text, viewport_width, probe);
                    trace!("caption expanding to {target}px");
                    self.visible_text = text;
                    self.height.start(target, self.duration_ms);
                    self.text_opacity.start(1.0, self.duration_ms);
                    self.state.phase = CaptionPhase::Expanding;
                    Some(self.visible_text.clone())
                }
                None => {
                    trace!("caption collapsed with no text");
                    self.state.phase = CaptionPhase::Idle;
                    if self.visible_text.is_empty() {
                        None
                    } else {
                        self.visible_text.clear();
                        Some(String::new())
                    }
                }
            },
            CaptionPhase::Expanding => {
                self.state.phase = CaptionPhase::Idle;
                None
            }
            CaptionPhase::Idle => None,
        }
    }

    fn measure(&mut self, text: &str, viewport_width: u32, probe: &mut dyn SurfaceProbe) -> f32 {
        if viewport_width != self.measured_width {
            self.measured.clear();
            self.measured_width = viewport_width;
        }
        if let Some(h) = self.measured.get(text) {
            return *h;
        }
        let h = probe.caption_height(text, viewport_width);
        let h = if h.is_finite() { h.max(0.0) } else { 0.0 };
        self.measured.insert(text.to_owned(), h);
        h
    }
}
