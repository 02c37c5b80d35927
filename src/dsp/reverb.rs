//! Reverb - Room Simulation via Delay Networks
//!
//! Reverb simulates the sound of a space by creating many delayed, filtered
//! reflections of the input signal. This implementation follows the Freeverb
//! layout: eight damped comb filters in parallel feeding four allpass filters
//! in series, one such tank per stereo channel.
//!
//! # Freeverb Architecture
//!
//! ```text
//!            ┌──→ [Comb 1] ──┐
//!            ├──→ [Comb 2] ──┤
//! Input ─(g)─┼──→   ...    ──┼──→ (+) ──→ [AP 1] ──→ [AP 2] ──→ [AP 3] ──→ [AP 4] ──→ wet
//!            └──→ [Comb 8] ──┘
//! ```
//!
//! The input is scaled by a small fixed gain (0.015) so eight combs with
//! feedback near 1.0 do not overload. The right tank uses the same tunings
//! plus a stereo spread of 23 samples, which decorrelates the channels.
//!
//! ## Comb Filters
//!
//! ```text
//! out  = buf[i]
//! lp   = out × (1 - damp) + lp × damp      (one-pole lowpass in the loop)
//! buf[i] = in + lp × feedback
//! ```
//!
//! ## Allpass Filters
//!
//! ```text
//! b      = buf[i]
//! buf[i] = in + b × 0.5
//! out    = b - in
//! ```
//!
//! # Parameters
//!
//! - **Room Size**: comb feedback, `0.7 + size × 0.28`
//! - **Damping**: lowpass coefficient in the comb loop, `damping × 0.4`
//! - **Width**: stereo cross-feed of the two tanks
//! - **Wet / Dry Level**: output gains (`wet × 3`, `dry × 2`)
//! - **Freeze**: feedback 1, no damping, no new input; the tail rings forever
//!
//! Tunings are given in samples at 44.1 kHz and rescaled for other rates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::dsp::SmoothedValue;

const COMB_TUNINGS: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNINGS: [usize; 4] = [556, 441, 341, 225];
const STEREO_SPREAD: usize = 23;
const TUNING_RATE: f32 = 44_100.0;

const FIXED_GAIN: f32 = 0.015;
const SCALE_WET: f32 = 3.0;
const SCALE_DRY: f32 = 2.0;
const SCALE_DAMP: f32 = 0.4;
const SCALE_ROOM: f32 = 0.28;
const OFFSET_ROOM: f32 = 0.7;

/// Parameter smoothing time.
const SMOOTHING_SECONDS: f32 = 0.01;

/// A damped feedback comb filter.
#[derive(Debug, Clone)]
pub struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
    filter_state: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            index: 0,
            filter_state: 0.0,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let output = self.buffer[self.index];
        self.filter_state = output * (1.0 - damp) + self.filter_state * damp;
        self.buffer[self.index] = input + self.filter_state * feedback;
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
        self.index = 0;
    }
}

/// A fixed-coefficient (0.5) Schroeder allpass.
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            index: 0,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let buffered = self.buffer[self.index];
        self.buffer[self.index] = input + buffered * 0.5;
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        buffered - input
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
    }
}

/// One channel's comb bank and allpass chain.
#[derive(Debug, Clone)]
struct Tank {
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
}

impl Tank {
    fn new(sample_rate: f32, spread: usize) -> Self {
        let scale = |tuning: usize| ((tuning + spread) as f32 * sample_rate / TUNING_RATE) as usize;
        Self {
            combs: COMB_TUNINGS.iter().map(|&t| CombFilter::new(scale(t))).collect(),
            allpasses: ALLPASS_TUNINGS
                .iter()
                .map(|&t| AllpassFilter::new(scale(t)))
                .collect(),
        }
    }

    #[inline]
    fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input, damp, feedback);
        }
        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }
        output
    }

    fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}

/// User-facing reverb settings, all 0..1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParameters {
    pub room_size: f32,
    pub damping: f32,
    pub wet_level: f32,
    pub dry_level: f32,
    pub width: f32,
    /// Values >= 0.5 freeze the tail.
    pub freeze: f32,
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
            freeze: 0.0,
        }
    }
}

impl ReverbParameters {
    pub fn is_frozen(&self) -> bool {
        self.freeze >= 0.5
    }
}

/// Stereo Freeverb with smoothed parameter changes.
#[derive(Debug, Clone)]
pub struct Reverb {
    parameters: ReverbParameters,
    sample_rate: f32,
    tanks: [Tank; 2],
    damping: SmoothedValue,
    feedback: SmoothedValue,
    dry_gain: SmoothedValue,
    wet_gain1: SmoothedValue,
    wet_gain2: SmoothedValue,
    input_gain: f32,
}

impl Reverb {
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            parameters: ReverbParameters::default(),
            sample_rate,
            tanks: [Tank::new(sample_rate, 0), Tank::new(sample_rate, STEREO_SPREAD)],
            damping: SmoothedValue::default(),
            feedback: SmoothedValue::default(),
            dry_gain: SmoothedValue::default(),
            wet_gain1: SmoothedValue::default(),
            wet_gain2: SmoothedValue::default(),
            input_gain: FIXED_GAIN,
        };
        reverb.prepare(sample_rate);
        reverb
    }

    /// Rebuild the delay lines for `sample_rate` and snap all gains.
    ///
    /// Allocates; call from configuration code only.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.tanks = [
            Tank::new(self.sample_rate, 0),
            Tank::new(self.sample_rate, STEREO_SPREAD),
        ];
        for smoothed in self.smoothed_mut() {
            smoothed.reset(sample_rate, SMOOTHING_SECONDS);
        }
        self.update_targets();
        for smoothed in self.smoothed_mut() {
            smoothed.snap_to_target();
        }
    }

    fn smoothed_mut(&mut self) -> [&mut SmoothedValue; 5] {
        [
            &mut self.damping,
            &mut self.feedback,
            &mut self.dry_gain,
            &mut self.wet_gain1,
            &mut self.wet_gain2,
        ]
    }

    pub fn parameters(&self) -> &ReverbParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: ReverbParameters) {
        if parameters != self.parameters {
            self.parameters = parameters;
            self.update_targets();
        }
    }

    fn update_targets(&mut self) {
        let p = self.parameters;
        let wet = p.wet_level * SCALE_WET;
        self.dry_gain.set_target(p.dry_level * SCALE_DRY);
        self.wet_gain1.set_target(0.5 * wet * (1.0 + p.width));
        self.wet_gain2.set_target(0.5 * wet * (1.0 - p.width));

        if p.is_frozen() {
            self.damping.set_target(0.0);
            self.feedback.set_target(1.0);
            self.input_gain = 0.0;
        } else {
            self.damping.set_target(p.damping * SCALE_DAMP);
            self.feedback.set_target(p.room_size * SCALE_ROOM + OFFSET_ROOM);
            self.input_gain = FIXED_GAIN;
        }
    }

    /// Process a mono block through the left tank.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            let input = *sample * self.input_gain;
            let damp = self.damping.next_value();
            let feedback = self.feedback.next_value();
            let wet = self.tanks[0].process(input, damp, feedback);
            *sample = wet * self.wet_gain1.next_value() + *sample * self.dry_gain.next_value();
        }
    }

    /// Process a stereo pair.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let [left_tank, right_tank] = &mut self.tanks;
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * self.input_gain;
            let damp = self.damping.next_value();
            let feedback = self.feedback.next_value();
            let out_l = left_tank.process(input, damp, feedback);
            let out_r = right_tank.process(input, damp, feedback);

            let dry = self.dry_gain.next_value();
            let wet1 = self.wet_gain1.next_value();
            let wet2 = self.wet_gain2.next_value();
            *l = out_l * wet1 + out_r * wet2 + *l * dry;
            *r = out_r * wet1 + out_l * wet2 + *r * dry;
        }
    }

    /// Process the first one or two channels of `buffer`; further channels are untouched.
    pub fn process(&mut self, buffer: &mut AudioBuffer) {
        match buffer.num_channels() {
            0 => {}
            1 => self.process_mono(buffer.channel_mut(0)),
            _ => {
                let mut channels = buffer.channels_mut();
                if let (Some(left), Some(right)) = (channels.next(), channels.next()) {
                    self.process_stereo(left, right);
                }
            }
        }
    }

    pub fn reset(&mut self) {
        for tank in &mut self.tanks {
            tank.reset();
        }
        for smoothed in self.smoothed_mut() {
            smoothed.snap_to_target();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wet_only() -> ReverbParameters {
        ReverbParameters {
            wet_level: 1.0,
            dry_level: 0.0,
            ..ReverbParameters::default()
        }
    }

    #[test]
    fn test_comb_filter_creates_echo() {
        let mut comb = CombFilter::new(10);

        let out1 = comb.process(1.0, 0.0, 0.5);
        assert!(out1.abs() < 0.01);

        for _ in 0..9 {
            comb.process(0.0, 0.0, 0.5);
        }

        let echo = comb.process(0.0, 0.0, 0.5);
        assert!((echo - 1.0).abs() < 1e-6);
        // second pass has gone round the loop once
        for _ in 0..9 {
            comb.process(0.0, 0.0, 0.5);
        }
        assert!((comb.process(0.0, 0.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_allpass_preserves_energy() {
        let mut allpass = AllpassFilter::new(5);

        let mut energy_in = 0.0;
        let mut energy_out = 0.0;
        for i in 0..200 {
            let input = if i < 10 { 1.0 } else { 0.0 };
            let output = allpass.process(input);
            energy_in += input * input;
            energy_out += output * output;
        }

        assert!(energy_out > energy_in * 0.8);
    }

    #[test]
    fn test_reverb_produces_tail() {
        let mut reverb = Reverb::new(48_000.0);
        reverb.set_parameters(wet_only());
        reverb.reset();

        let mut left = vec![0.0; 8192];
        let mut right = vec![0.0; 8192];
        left[0] = 1.0;
        right[0] = 1.0;
        reverb.process_stereo(&mut left, &mut right);

        // Shortest comb at 48 kHz is ~1214 samples; after that the tail is audible
        let late = left[2048..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(late > 1e-4, "late tail peak {}", late);
    }

    #[test]
    fn test_dry_only_passes_input_scaled() {
        let mut reverb = Reverb::new(48_000.0);
        reverb.set_parameters(ReverbParameters {
            wet_level: 0.0,
            dry_level: 0.5,
            ..ReverbParameters::default()
        });
        reverb.reset();

        let mut samples = vec![0.25; 64];
        reverb.process_mono(&mut samples);
        // dry scale 2 × 0.5 = unity
        assert!(samples.iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_reverb_stability() {
        let mut reverb = Reverb::new(48_000.0);
        reverb.set_parameters(ReverbParameters {
            room_size: 1.0,
            damping: 0.0,
            ..wet_only()
        });

        let mut left = vec![0.1; 48_000];
        let mut right = vec![-0.1; 48_000];
        reverb.process_stereo(&mut left, &mut right);
        for s in left.iter().chain(right.iter()) {
            assert!(s.is_finite());
            assert!(s.abs() < 10.0, "Reverb output unstable: {}", s);
        }
    }

    #[test]
    fn test_freeze_sustains_and_ignores_input() {
        let mut reverb = Reverb::new(48_000.0);
        reverb.set_parameters(wet_only());
        reverb.reset();

        let mut left = vec![0.0; 4800];
        left[0] = 1.0;
        let mut right = left.clone();
        reverb.process_stereo(&mut left, &mut right);

        reverb.set_parameters(ReverbParameters {
            freeze: 1.0,
            ..wet_only()
        });
        // loud input while frozen must not enter the tank
        let mut left = vec![0.0; 48_000];
        let mut right = vec![0.0; 48_000];
        left[..480].fill(1.0);
        reverb.process_stereo(&mut left, &mut right);

        let energy = |s: &[f32]| s.iter().map(|x| x * x).sum::<f32>();
        let early = energy(&right[4800..9600]);
        let late = energy(&right[43_200..]);
        assert!(late > early * 0.5, "frozen tail decayed: early={} late={}", early, late);
        assert!(late < early * 2.0, "frozen tail grew: early={} late={}", early, late);
    }

    #[test]
    fn test_tunings_scale_with_sample_rate() {
        let at_44 = Tank::new(44_100.0, 0);
        let at_88 = Tank::new(88_200.0, 0);
        assert_eq!(at_44.combs[0].buffer.len(), 1116);
        assert_eq!(at_88.combs[0].buffer.len(), 2232);
    }
}
