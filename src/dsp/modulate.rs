//! LFO-driven parameter paths.

/*
Parameter Modulation
====================

A modulated parameter is a host value that an LFO pushes around:

    modulated = base + lfo × depth

  base     The knob value the host reports (e.g. THRESHOLD = 0.1).
  lfo      Bipolar oscillator output, -1.0..+1.0.
  depth    How far the LFO may move the parameter (THR_LFO_DEPTH = 0.01).

With base 0.1 and depth 0.01 the threshold sweeps 0.09..0.11.

Sample-rate, not block-rate
---------------------------

Every modulated path here advances once per sample frame. The LFO phase is
therefore continuous across the whole stream no matter how the host slices
it into blocks, and a 20 Hz LFO on a 2048-sample block does not staircase.

Depth smoothing
---------------

The depth is the control a user grabs while the effect is running, and a
depth jump multiplies straight into the signal path. So depth goes through a
SmoothedValue: it is re-targeted to the live parameter on every sample, but
only walks toward it over the ramp time.

Nothing here clamps. If base ± depth leaves the parameter's sensible range
(a threshold below zero, say) the consumer has to cope with it.
*/

use crate::dsp::{Lfo, LfoWaveform, SmoothedValue};

/// Calculate a modulated parameter value: `base + modulator × depth`.
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + (modulator * depth)
}

/// One LFO plus one smoothed depth, producing `base + lfo × depth` per sample.
#[derive(Debug, Clone)]
pub struct ModulatedParam {
    lfo: Lfo,
    depth: SmoothedValue,
}

impl ModulatedParam {
    pub fn new(waveform: LfoWaveform, sample_rate: f32, depth_ramp_seconds: f32) -> Self {
        let mut depth = SmoothedValue::new(0.0);
        depth.reset(sample_rate, depth_ramp_seconds);
        Self {
            lfo: Lfo::new(waveform, 1.0, sample_rate),
            depth,
        }
    }

    /// Reconfigure for a new sample rate; phase restarts, depth snaps to its target.
    pub fn prepare(&mut self, sample_rate: f32, depth_ramp_seconds: f32) {
        self.lfo.set_sample_rate(sample_rate);
        self.lfo.reset();
        self.depth.reset(sample_rate, depth_ramp_seconds);
    }

    /// Start the depth at `depth` with no ramp.
    pub fn set_depth_immediate(&mut self, depth: f32) {
        self.depth.set_immediate(depth);
    }

    #[inline]
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.lfo.set_frequency(rate_hz);
    }

    /// Advance the LFO and the depth ramp by one sample.
    ///
    /// `depth_target` is the live depth parameter; the depth actually used
    /// only steps toward it.
    #[inline]
    pub fn next(&mut self, base: f32, depth_target: f32) -> f32 {
        self.depth.set_target(depth_target);
        let modulator = self.lfo.next_sample();
        apply_modulation(base, modulator, self.depth.next_value())
    }

    pub fn depth(&self) -> f32 {
        self.depth.current()
    }

    pub fn reset(&mut self) {
        self.lfo.reset();
        self.depth.snap_to_target();
    }
}
