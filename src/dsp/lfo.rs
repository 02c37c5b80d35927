//! Low Frequency Oscillator (LFO).

/*
Low Frequency Oscillators
=========================

An LFO is an ordinary oscillator slowed down below hearing (~0.01-20 Hz).
Nobody listens to it directly; its output moves another parameter.

  phase       Position inside one cycle, kept in [0.0, 1.0).
  increment   How far the phase moves per sample: frequency / sample_rate.
  bipolar     Output swings -1.0..+1.0, so the modulated parameter moves
              above AND below its base value.

The phase is a running accumulator that is never reset between blocks. If it
were, every block boundary would restart the waveform and you would hear a
tick at the block rate instead of a smooth sweep.

    block 1          block 2          block 3
    ├────────────────┼────────────────┼────────────────┤
    phase 0.00 → 0.31 → 0.62 → 0.93 → 0.24 (wrapped) ...

Waveforms
---------

  Sine       smooth, the default for every effect here
  Triangle   constant rate of change, slightly more "mechanical"
  Square     hard switch between -1 and +1
  Saw        ramp -1 → +1 then snap back

Changing the frequency only changes the increment, never the phase, so rate
changes are click-free.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LfoWaveform {
    #[default]
    Sine,
    Triangle,
    Square,
    Saw,
}

impl LfoWaveform {
    /// Evaluate the waveform at `phase` in [0.0, 1.0).
    #[inline]
    pub fn evaluate(self, phase: f32) -> f32 {
        match self {
            LfoWaveform::Sine => (phase * TAU).sin(),
            LfoWaveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            LfoWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            LfoWaveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// Free-running bipolar oscillator, advanced one sample per call.
#[derive(Debug, Clone)]
pub struct Lfo {
    waveform: LfoWaveform,
    phase: f32,
    frequency: f32,
    sample_rate: f32,
    increment: f32,
}

impl Lfo {
    pub fn new(waveform: LfoWaveform, frequency: f32, sample_rate: f32) -> Self {
        let mut lfo = Self {
            waveform,
            phase: 0.0,
            frequency,
            sample_rate: sample_rate.max(1.0),
            increment: 0.0,
        };
        lfo.update_increment();
        lfo
    }

    pub fn sine(frequency: f32, sample_rate: f32) -> Self {
        Self::new(LfoWaveform::Sine, frequency, sample_rate)
    }

    fn update_increment(&mut self) {
        self.increment = self.frequency / self.sample_rate;
    }

    /// Change the rate; the phase carries on from where it is.
    ///
    /// Non-finite rates are ignored.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_finite() && frequency != self.frequency {
            self.frequency = frequency;
            self.update_increment();
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.update_increment();
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Jump to `phase` (in cycles, wrapped into 0..1).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.rem_euclid(1.0);
    }

    /// Output at the current phase, then advance by one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = self.waveform.evaluate(self.phase);
        self.phase += self.increment;
        // rem_euclid also handles negative or multi-cycle increments
        if !(0.0..1.0).contains(&self.phase) {
            self.phase = self.phase.rem_euclid(1.0);
        }
        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Samples in one LFO cycle.
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}
