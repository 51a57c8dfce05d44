//! Transition controller: the single authoritative strip animation.
//!
//! `begin` commits the target index immediately and animates only the visual
//! offset. A new request stops the previous animation in place before
//! starting, so there is never more than one strip tween in flight.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::NamedDuration;
use crate::drag::DragSession;
use crate::geometry::CarouselGeometry;
use crate::outputs::{Arrow, Outputs, SurfaceWrite};
use crate::tween::{Tween, TweenStep};

/// What currently owns the strip offset. Animating and dragging are
/// mutually exclusive by construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Motion {
    #[default]
    Idle,
    Animating,
    Dragging(DragSession),
}

/// Read-only snapshot of navigation state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_index: Option<usize>,
    /// Offset the strip is heading to (or resting on).
    pub target_offset: f32,
    /// Offset the strip currently shows.
    pub strip_offset: f32,
    pub is_animating: bool,
    pub is_dragging: bool,
}

#[derive(Debug)]
pub struct TransitionController {
    strip: Tween,
    previous_arrow: Tween,
    next_arrow: Tween,
    motion: Motion,
    current: Option<usize>,
    duration_ms: f32,
}

impl TransitionController {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            strip: Tween::settled(0.0),
            previous_arrow: Tween::settled(0.0),
            next_arrow: Tween::settled(0.0),
            motion: Motion::Idle,
            current: None,
            duration_ms,
        }
    }

    #[inline]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    pub fn strip_offset(&self) -> f32 {
        self.strip.value()
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging(_))
    }

    pub fn arrow_opacity(&self, arrow: Arrow) -> f32 {
        match arrow {
            Arrow::Previous => self.previous_arrow.value(),
            Arrow::Next => self.next_arrow.value(),
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current,
            target_offset: self.strip.target(),
            strip_offset: self.strip.value(),
            is_animating: self.is_animating(),
            is_dragging: self.is_dragging(),
        }
    }

    /// Commit `index` and start sliding toward it.
    ///
    /// The caller guarantees `index < slide_count`.
    pub fn begin(&mut self, index: usize, slide_count: usize, geometry: &CarouselGeometry) {
        self.cancel();
        self.strip.start(geometry.offset_for(index), self.duration_ms);
        self.motion = Motion::Animating;
        self.current = Some(index);

        let previous = if index == 0 { 0.0 } else { 1.0 };
        let next = if index + 1 == slide_count { 0.0 } else { 1.0 };
        // Arrows fade at the default tween speed.
        let fade_ms = NamedDuration::Normal.millis();
        self.previous_arrow.start(previous, fade_ms);
        self.next_arrow.start(next, fade_ms);
    }

    /// Stop the strip animation in place. A drag session is left untouched.
    pub fn cancel(&mut self) {
        self.strip.stop();
        if self.is_animating() {
            self.motion = Motion::Idle;
        }
    }

    /// Abandon any animation and place the strip on the committed index.
    pub fn reposition(&mut self, geometry: &CarouselGeometry, out: &mut Outputs) {
        self.cancel();
        let left = geometry.offset_for(self.current.unwrap_or(0));
        self.strip.jump_to(left);
        out.push(SurfaceWrite::StripOffset { left });
    }

    /// Advance the strip and arrow fades.
    pub fn step(&mut self, dt_ms: f32, out: &mut Outputs) {
        match self.strip.step(dt_ms) {
            TweenStep::Idle => {}
            TweenStep::Running(left) => out.push(SurfaceWrite::StripOffset { left }),
            TweenStep::Completed(left) => {
                out.push(SurfaceWrite::StripOffset { left });
                if self.is_animating() {
                    self.motion = Motion::Idle;
                }
                trace!("strip settled at {left} (index {:?})", self.current);
            }
        }
        for (arrow, tween) in [
            (Arrow::Previous, &mut self.previous_arrow),
            (Arrow::Next, &mut self.next_arrow),
        ] {
            match tween.step(dt_ms) {
                TweenStep::Running(opacity) | TweenStep::Completed(opacity) => {
                    out.push(SurfaceWrite::ArrowOpacity { arrow, opacity })
                }
                TweenStep::Idle => {}
            }
        }
    }

    pub(crate) fn enter_drag(&mut self, session: DragSession) {
        self.cancel();
        self.motion = Motion::Dragging(session);
    }

    pub(crate) fn leave_drag(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.motion) {
            Motion::Dragging(session) => Some(session),
            other => {
                self.motion = other;
                None
            }
        }
    }

    pub(crate) fn drag_session_mut(&mut self) -> Option<&mut DragSession> {
        match &mut self.motion {
            Motion::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Place the strip directly, bypassing animation.
    pub(crate) fn set_strip_offset(&mut self, left: f32, out: &mut Outputs) {
        self.strip.jump_to(left);
        out.push(SurfaceWrite::StripOffset { left });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> CarouselGeometry {
        CarouselGeometry {
            viewport_width: 900,
            viewport_height: 600,
            aspect_ratio: 1.5,
        }
    }

    #[test]
    fn begin_commits_index_before_animation_settles() {
        let mut tc = TransitionController::new(250.0);
        tc.begin(2, 3, &geometry());
        assert_eq!(tc.current(), Some(2));
        assert!(tc.is_animating());
        assert_eq!(tc.state().target_offset, -1800.0);
        assert_eq!(tc.strip_offset(), 0.0);

        let mut out = Outputs::default();
        tc.step(300.0, &mut out);
        assert!(!tc.is_animating());
        assert_eq!(tc.strip_offset(), -1800.0);
        assert_eq!(out.last_strip_offset(), Some(-1800.0));
    }

    #[test]
    fn second_request_replaces_first() {
        let mut tc = TransitionController::new(250.0);
        let mut out = Outputs::default();
        tc.begin(2, 3, &geometry());
        tc.step(100.0, &mut out);
        tc.begin(1, 3, &geometry());
        assert_eq!(tc.state().target_offset, -900.0);
        tc.step(1000.0, &mut out);
        assert_eq!(tc.strip_offset(), -900.0);
        assert_eq!(tc.current(), Some(1));
    }

    #[test]
    fn cancel_leaves_drag_session_alone() {
        let mut tc = TransitionController::new(250.0);
        tc.enter_drag(DragSession::new(10.0, 0.0));
        tc.cancel();
        assert!(tc.is_dragging());
        assert!(tc.leave_drag().is_some());
        assert!(tc.leave_drag().is_none());
        assert_eq!(tc.motion(), &Motion::Idle);
    }
}
