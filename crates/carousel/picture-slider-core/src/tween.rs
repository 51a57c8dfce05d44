//! Single-property tween used for every animated surface value.
//!
//! A tween is advanced explicitly with [`Tween::step`]. Stopping freezes the
//! value where it currently is; it never rolls back and never jumps to the
//! target.

use serde::{Deserialize, Serialize};

/// Timing curve applied to normalized progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Half-cosine ease in/out.
    #[default]
    SineInOut,
}

impl Easing {
    /// Map progress `p` in [0, 1] through the curve.
    #[inline]
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::SineInOut => -((std::f32::consts::PI * p).cos() - 1.0) / 2.0,
        }
    }
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Result of advancing a tween by one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TweenStep {
    /// Nothing was running.
    Idle,
    /// Still running; carries the new interpolated value.
    Running(f32),
    /// Reached its target on this tick.
    Completed(f32),
}

#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    value: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: Easing,
    running: bool,
}

impl Tween {
    /// A tween at rest on `value`.
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed_ms: 0.0,
            duration_ms: 0.0,
            easing: Easing::default(),
            running: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Restart from the current value toward `to`.
    ///
    /// Any animation in flight is stopped in place first.
    pub fn start(&mut self, to: f32, duration_ms: f32) {
        self.stop();
        self.from = self.value;
        self.to = to;
        self.elapsed_ms = 0.0;
        self.duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        self.running = true;
    }

    /// Freeze at the current interpolated value. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.from = self.value;
        self.to = self.value;
    }

    /// Stop and place the value directly.
    pub fn jump_to(&mut self, value: f32) {
        self.value = value;
        self.stop();
    }

    pub fn step(&mut self, dt_ms: f32) -> TweenStep {
        if !self.running {
            return TweenStep::Idle;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms {
            self.value = self.to;
            self.running = false;
            self.from = self.to;
            return TweenStep::Completed(self.value);
        }
        let t = self.easing.apply(self.elapsed_ms / self.duration_ms);
        self.value = lerp_f32(self.from, self.to, t);
        TweenStep::Running(self.value)
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Destination of the running animation, or the resting value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::settled(0.0)
    }
}
