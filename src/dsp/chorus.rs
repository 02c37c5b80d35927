//! Chorus / vibrato
//!
//! A short delay line whose delay time is swept by a sine LFO. Sweeping the
//! delay shifts the pitch of the delayed copy up and down slightly. Mixed
//! with the dry signal that is a chorus; at 100% wet (how Gramophony runs it)
//! only the wobbling copy is heard, which is vibrato.
//!
//! ```text
//! x ──┬─────────────────────────────(1 - mix)──┐
//!     │                                        (+)── y
//!     └─▶(+)─▶[ delay: centre + lfo·depth ]─┬─(mix)┘
//!         ▲                                 │
//!         └────────────(feedback)───────────┘
//! ```
//!
//! Parameters follow the usual plugin-framework chorus:
//!
//! - rate: LFO speed in Hz
//! - depth: 0..1, fraction of the 20 ms maximum delay swing
//! - centre delay: ms, the delay at LFO = 0
//! - feedback: -1..1 (clamped to ±0.95)
//! - mix: 0..1 dry/wet
//!
//! The right channel's LFO runs a quarter cycle ahead of the left.

use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::{Lfo, LfoWaveform};
use crate::MAX_CHANNELS;

/// Largest delay swing at depth 1.0.
pub const MAX_DEPTH_MS: f32 = 20.0;
/// Largest centre delay accepted.
pub const MAX_CENTRE_DELAY_MS: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Chorus {
    delays: Vec<DelayLine>,
    lfos: Vec<Lfo>,
    feedback_state: [f32; MAX_CHANNELS],
    sample_rate: f32,
    rate: f32,
    depth: f32,
    centre_delay_ms: f32,
    feedback: f32,
    mix: f32,
}

impl Chorus {
    pub fn new() -> Self {
        Self {
            delays: Vec::new(),
            lfos: Vec::new(),
            feedback_state: [0.0; MAX_CHANNELS],
            sample_rate: 48_000.0,
            rate: 1.0,
            depth: 0.25,
            centre_delay_ms: 7.0,
            feedback: 0.0,
            mix: 0.5,
        }
    }

    /// Allocate one delay line per channel for the given sample rate.
    pub fn prepare(&mut self, sample_rate: f32, num_channels: usize) {
        self.sample_rate = sample_rate;
        let channels = num_channels.min(MAX_CHANNELS);
        let max_delay = ((MAX_CENTRE_DELAY_MS + MAX_DEPTH_MS) * sample_rate / 1000.0).ceil() as usize;
        self.delays = (0..channels).map(|_| DelayLine::new(max_delay)).collect();
        self.lfos = (0..channels)
            .map(|_| Lfo::new(LfoWaveform::Sine, self.rate, sample_rate))
            .collect();
        self.reset();
    }

    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = rate_hz.max(0.0);
        for lfo in &mut self.lfos {
            lfo.set_frequency(self.rate);
        }
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    pub fn set_centre_delay(&mut self, ms: f32) {
        self.centre_delay_ms = ms.clamp(1.0, MAX_CENTRE_DELAY_MS);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.95, 0.95);
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Process one channel's samples in place.
    ///
    /// Channels that were not prepared pass through.
    pub fn process_channel(&mut self, channel: usize, samples: &mut [f32]) {
        let (Some(delay), Some(lfo)) = (self.delays.get_mut(channel), self.lfos.get_mut(channel))
        else {
            return;
        };
        let ms_to_samples = self.sample_rate / 1000.0;
        let mut feedback_state = self.feedback_state[channel];

        for sample in samples.iter_mut() {
            let lfo_value = lfo.next_sample();
            let delay_ms = self.centre_delay_ms + lfo_value * self.depth * MAX_DEPTH_MS * 0.5;
            let delayed = delay.read_interpolated(delay_ms * ms_to_samples);

            let dry = *sample;
            delay.write(dry + feedback_state * self.feedback);
            feedback_state = delayed;

            *sample = dry * (1.0 - self.mix) + delayed * self.mix;
        }

        self.feedback_state[channel] = feedback_state;
    }

    pub fn reset(&mut self) {
        for delay in &mut self.delays {
            delay.reset();
        }
        for (ch, lfo) in self.lfos.iter_mut().enumerate() {
            lfo.set_phase(ch as f32 * 0.25);
        }
        self.feedback_state = [0.0; MAX_CHANNELS];
    }
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new()
    }
}
