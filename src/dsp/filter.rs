use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_CHANNELS;

/*
| type       | used by            | passes                   | rejects / shapes      |
| ---------- | ------------------ | ------------------------ | --------------------- |
| band-pass  | Gramophony tone    | around the centre freq   | lows and highs        |
| high-pass  | Easyverb low cut   | above corner             | rumble below corner   |
| high-shelf | Easyverb tone      | everything               | boosts/cuts the highs |

All three are RBJ-cookbook biquads run in transposed direct form II:

    y    = b0·x + s1
    s1'  = b1·x - a1·y + s2
    s2'  = b2·x - a2·y

Coefficients depend on sample rate, corner frequency and Q. They are cached
per channel and recomputed the moment any of those inputs differ from the
cached ones, so a coefficient set is never older than the current sample.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    BandPass,
    HighPass,
    HighShelf { gain_db: f32 },
}

/// Normalised biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Coefficients {
    /// Pass-through (y = x).
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Design coefficients for `filter_type` at `frequency` Hz.
    ///
    /// The frequency is kept inside (10 Hz, 0.49 × sample rate) so extreme
    /// modulation cannot push the poles onto the unit circle.
    pub fn design(filter_type: FilterType, sample_rate: f32, frequency: f32, q: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let frequency = frequency.clamp(10.0, sample_rate * 0.49);
        let q = q.max(0.01);

        let w0 = TAU * frequency / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);

        let (b0, b1, b2, a0, a1, a2) = match filter_type {
            FilterType::BandPass => (alpha, 0.0, -alpha, 1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha),
            FilterType::HighPass => {
                let b = (1.0 + cos_w0) * 0.5;
                (b, -(1.0 + cos_w0), b, 1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha)
            }
            FilterType::HighShelf { gain_db } => {
                let a = 10.0f32.powf(gain_db / 40.0);
                let sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 + sqrt_a_alpha),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 - sqrt_a_alpha),
                    (a + 1.0) - (a - 1.0) * cos_w0 + sqrt_a_alpha,
                    2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
                    (a + 1.0) - (a - 1.0) * cos_w0 - sqrt_a_alpha,
                )
            }
        };

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Single-channel second-order IIR section.
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: Coefficients,
    s1: f32,
    s2: f32,
}

impl Biquad {
    pub fn new(coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            s1: 0.0,
            s2: 0.0,
        }
    }

    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    #[inline]
    pub fn next_sample(&mut self, x: f32) -> f32 {
        let Coefficients { b0, b1, b2, a1, a2 } = self.coefficients;
        let y = b0 * x + self.s1;
        self.s1 = b1 * x - a1 * y + self.s2;
        self.s2 = b2 * x - a2 * y;
        y
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new(Coefficients::IDENTITY)
    }
}

/// One biquad per channel with a shared response and a per-channel frequency offset.
///
/// Offsetting the channels by a few Hz (e.g. -10/+10) decorrelates them
/// slightly and widens the stereo image.
#[derive(Debug, Clone)]
pub struct ToneFilter {
    filter_type: FilterType,
    q: f32,
    sample_rate: f32,
    channel_offsets_hz: [f32; MAX_CHANNELS],
    cached_frequency: [f32; MAX_CHANNELS],
    filters: [Biquad; MAX_CHANNELS],
}

impl ToneFilter {
    pub fn new(filter_type: FilterType, q: f32, channel_offsets_hz: [f32; MAX_CHANNELS]) -> Self {
        Self {
            filter_type,
            q,
            sample_rate: 48_000.0,
            channel_offsets_hz,
            cached_frequency: [f32::NAN; MAX_CHANNELS],
            filters: Default::default(),
        }
    }

    /// Set the sample rate, clear state and force every channel to recompute.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.invalidate();
        self.reset();
    }

    fn invalidate(&mut self) {
        // NaN never compares equal, so the next sample recomputes
        self.cached_frequency = [f32::NAN; MAX_CHANNELS];
    }

    /// Filter one sample of `channel` with its corner at `frequency` plus the channel offset.
    ///
    /// Channels beyond the filter's capacity pass through unchanged. A
    /// non-finite `frequency` keeps the last designed coefficients.
    #[inline]
    pub fn process(&mut self, channel: usize, x: f32, frequency: f32) -> f32 {
        if channel >= MAX_CHANNELS {
            return x;
        }
        let target = frequency + self.channel_offsets_hz[channel];
        if target.is_finite() && target != self.cached_frequency[channel] {
            let coefficients = Coefficients::design(self.filter_type, self.sample_rate, target, self.q);
            self.filters[channel].set_coefficients(coefficients);
            self.cached_frequency[channel] = target;
        }
        self.filters[channel].next_sample(x)
    }

    /// Frequency the channel's current coefficients were designed for.
    pub fn designed_frequency(&self, channel: usize) -> Option<f32> {
        self.cached_frequency
            .get(channel)
            .copied()
            .filter(|f| !f.is_nan())
    }

    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }
}
