//! Hover-revealed control panel and focus-scoped keyboard handling.
//!
//! Keyboard input is only honoured while the pointer is over the carousel.
//! Activation emits [`SurfaceWrite::KeyboardFocus`] so hosts can attach a key
//! listener for exactly that span instead of keeping a global one.

use serde::{Deserialize, Serialize};

use crate::outputs::{Outputs, SurfaceWrite};
use crate::tween::{Tween, TweenStep};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match s {
            "ArrowLeft" | "Left" | "left" => Key::ArrowLeft,
            "ArrowRight" | "Right" | "right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    Previous,
    Next,
}

#[derive(Debug)]
pub struct ControlsPanel {
    opacity: Tween,
    active_opacity: f32,
    duration_ms: f32,
    focused: bool,
}

impl ControlsPanel {
    pub fn new(active_opacity: f32, duration_ms: f32) -> Self {
        Self {
            opacity: Tween::settled(0.0),
            active_opacity,
            duration_ms,
            focused: false,
        }
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Pointer entered: reveal controls and take keyboard focus.
    pub fn activate(&mut self, out: &mut Outputs) {
        self.opacity.start(self.active_opacity, self.duration_ms);
        if !self.focused {
            self.focused = true;
            out.push(SurfaceWrite::KeyboardFocus { active: true });
        }
    }

    /// Pointer left: hide controls and release keyboard focus.
    pub fn deactivate(&mut self, out: &mut Outputs) {
        self.opacity.start(0.0, self.duration_ms);
        if self.focused {
            self.focused = false;
            out.push(SurfaceWrite::KeyboardFocus { active: false });
        }
    }

    /// Map a key press to a navigation command while focused.
    pub fn command_for(&self, key: Key) -> Option<KeyCommand> {
        if !self.focused {
            return None;
        }
        match key {
            Key::ArrowLeft => Some(KeyCommand::Previous),
            Key::ArrowRight => Some(KeyCommand::Next),
            Key::Other => None,
        }
    }

    pub fn step(&mut self, dt_ms: f32, out: &mut Outputs) {
        match self.opacity.step(dt_ms) {
            TweenStep::Running(opacity) | TweenStep::Completed(opacity) => {
                out.push(SurfaceWrite::ControlsOpacity { opacity })
            }
            TweenStep::Idle => {}
        }
    }
}
