//! Threshold compression without an envelope.
//!
//! This is the "gramophone squash": every sample beyond ±threshold has its
//! excess divided by the ratio, and the result is pushed back up by a make-up
//! gain that depends only on the threshold. There is no attack, release or
//! level detector, so the stage is a static transfer curve:
//!
//! ```text
//!   out
//!    │            ╱ slope 1/ratio
//!  t ┼──────────●
//!    │        ╱ slope 1
//!    │      ╱
//! ───┼────╱──────────── in
//!    │  ╱   t
//! ```
//!
//! With ratio 4: `x ≥ t → x/4 + 3t/4`, `x ≤ -t → x/4 - 3t/4`. Both branches
//! meet the identity line exactly at ±t, so the curve is continuous.
//!
//! Make-up gain is `K - C·t²`, tuned so output sits near unity at the top of
//! the threshold range (K = 2, C = 11 gives ≈1.01 at t = 0.3).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calibration of the compressor curve and its make-up gain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorConfig {
    pub ratio: f32,
    /// Make-up gain at threshold 0.
    pub makeup_k: f32,
    /// Quadratic falloff of make-up gain with threshold.
    pub makeup_c: f32,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            ratio: 4.0,
            makeup_k: 2.0,
            makeup_c: 11.0,
        }
    }
}

/// Apply the static compression curve to one sample.
#[inline]
pub fn compress(x: f32, threshold: f32, ratio: f32) -> f32 {
    let knee = threshold * (ratio - 1.0) / ratio;
    if x >= threshold {
        x / ratio + knee
    } else if x <= -threshold {
        x / ratio - knee
    } else {
        x
    }
}

/// `K - C·t²`
#[inline]
pub fn makeup_gain(threshold: f32, k: f32, c: f32) -> f32 {
    k - c * threshold * threshold
}

/// Stateless compressor stage holding its calibration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compressor {
    config: CompressorConfig,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress and apply make-up gain.
    #[inline]
    pub fn process(&self, x: f32, threshold: f32) -> f32 {
        let CompressorConfig {
            ratio,
            makeup_k,
            makeup_c,
        } = self.config;
        compress(x, threshold, ratio) * makeup_gain(threshold, makeup_k, makeup_c)
    }
}
