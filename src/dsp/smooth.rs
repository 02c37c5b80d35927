//! Linear parameter ramps for zipper-free changes.
//!
//! A raw parameter read from another thread can jump by any amount between
//! two samples. Feeding that jump straight into a gain or modulation depth is
//! an audible click. [`SmoothedValue`] walks from the old value to the new one
//! in equal steps over a fixed ramp time instead.
//!
//! ```
//! use tapeworks::dsp::SmoothedValue;
//!
//! let mut depth = SmoothedValue::new(0.0);
//! depth.reset(48_000.0, 0.05); // 50 ms ramp
//! depth.set_target(0.2);
//!
//! let first = depth.next_value();
//! assert!(first > 0.0 && first < 0.2);
//! ```

/// A value that ramps linearly toward its target.
///
/// `current` always moves monotonically toward `target` and never passes it.
#[derive(Debug, Clone)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    step: f32,
    countdown: usize,
    steps_to_target: usize,
}

impl SmoothedValue {
    /// Create a value with no ramp (changes are instant until [`reset`](Self::reset)).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            countdown: 0,
            steps_to_target: 0,
        }
    }

    /// Set the ramp length and snap to the current target.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let steps = (sample_rate.max(0.0) * ramp_seconds.max(0.0)).floor();
        self.steps_to_target = steps as usize;
        self.snap_to_target();
    }

    /// Start ramping toward a new target.
    ///
    /// Re-setting the same target every sample is free and does not restart
    /// the ramp. Non-finite targets are ignored.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if !target.is_finite() || target == self.target {
            return;
        }
        if self.steps_to_target == 0 {
            self.set_immediate(target);
            return;
        }
        self.target = target;
        self.countdown = self.steps_to_target;
        self.step = (self.target - self.current) / self.countdown as f32;
    }

    /// Jump straight to `value` with no ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
        self.countdown = 0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.countdown == 0 {
            return self.target;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
            // rounding must never carry us past the target
            self.current = if self.step > 0.0 {
                self.current.min(self.target)
            } else {
                self.current.max(self.target)
            };
        }
        self.current
    }

    /// Advance `samples` steps at once.
    pub fn skip(&mut self, samples: usize) -> f32 {
        if samples >= self.countdown {
            self.snap_to_target();
        } else {
            self.countdown -= samples;
            self.current += self.step * samples as f32;
        }
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.countdown > 0
    }

    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.countdown = 0;
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
