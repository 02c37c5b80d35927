//! Wave folding
//!
//! A folder reshapes the waveform by mirroring whatever pokes out past a
//! threshold back inside it. Where a clipper flattens peaks, a folder turns
//! them over, so louder input produces *more* wiggles instead of more
//! squareness.
//!
//! # The Stage
//!
//! For each sample:
//!
//! ```text
//! y = x × gain + bias
//! if y >  t:  y =  2t - y      (mirror around +t)
//! if y < -t:  y = -2t - y      (mirror around -t)
//! out = y × output_gain
//! ```
//!
//! # One pass, not to convergence
//!
//! Each side is checked exactly once, positive side first. A sample that
//! overshoots +t by more than 2t lands below -t after the first mirror and is
//! mirrored again by the second check; anything still out of range after that
//! is left where it is. This is *not* the classic iterative
//! foldback that loops until the sample is inside [-t, t]:
//!
//! ```text
//!  t = 0.3     y = 0.8   →  2(0.3) - 0.8  = -0.2            (one fold)
//!              y = 1.2   →  0.6 - 1.2 = -0.6 → -0.6 + 0.6 = 0.0   (both sides)
//!              y = 2.0   →  -1.4 → 0.8                       (left outside)
//! ```
//!
//! The result stays finite for any finite input, including t = 0 and negative
//! thresholds (an LFO can drag the threshold below zero); those merely stop
//! sounding like folding.
//!
//! # Bias
//!
//! Bias shifts the signal before folding so the two sides fold at different
//! input levels, adding even harmonics.

/// Mirror `y` once around `+threshold`, then once around `-threshold`.
#[inline]
pub fn fold(y: f32, threshold: f32) -> f32 {
    let mut y = y;
    if y > threshold {
        y = 2.0 * threshold - y;
    }
    if y < -threshold {
        y = -2.0 * threshold - y;
    }
    y
}

/// Gain and bias the input, without folding.
#[inline]
pub fn drive(x: f32, gain: f32, bias: f32) -> f32 {
    x * gain + bias
}

/// Full folder stage: drive, fold, output gain.
#[inline]
pub fn wavefold(x: f32, gain: f32, bias: f32, threshold: f32, output_gain: f32) -> f32 {
    fold(drive(x, gain, bias), threshold) * output_gain
}

/// Apply the folder stage to an entire buffer in place.
pub fn wavefold_buffer(buffer: &mut [f32], gain: f32, bias: f32, threshold: f32, output_gain: f32) {
    for sample in buffer.iter_mut() {
        *sample = wavefold(*sample, gain, bias, threshold, output_gain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_threshold_is_untouched() {
        assert_eq!(fold(0.25, 0.3), 0.25);
        assert_eq!(fold(-0.3, 0.3), -0.3);
        assert_eq!(fold(0.3, 0.3), 0.3);
    }

    #[test]
    fn test_single_fold_above() {
        // 0.8 folds to 2 * 0.3 - 0.8
        let out = wavefold(0.8, 1.0, 0.0, 0.3, 1.0);
        assert!((out - (-0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_single_fold_below() {
        let out = fold(-0.5, 0.3);
        assert!((out - (-0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_output_gain_scales_folded_sample() {
        let out = wavefold(0.8, 1.0, 0.0, 0.3, 0.5);
        assert!((out - (-0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_bias_applied_before_fold() {
        // 0.2 * 2.0 + 0.1 = 0.5 → 2 * 0.4 - 0.5 = 0.3
        let out = wavefold(0.2, 2.0, 0.1, 0.4, 1.0);
        assert!((out - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_large_overshoot_folds_each_side_once() {
        // 1.2 → -0.6 (below -0.3) → -2(0.3) + 0.6 = 0.0
        assert!(fold(1.2, 0.3).abs() < 1e-6);
        // 2.0 → -1.4 → 0.8, left outside the threshold
        assert!((fold(2.0, 0.3) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_threshold_stays_finite() {
        for &x in &[-1.0, -0.1, 0.0, 0.1, 1.0] {
            let out = fold(x, 0.0);
            assert!(out.is_finite());
            assert_eq!(out.abs(), x.abs());
        }
    }

    #[test]
    fn test_buffer_matches_per_sample() {
        let mut buffer = [0.1, 0.5, -0.9];
        wavefold_buffer(&mut buffer, 1.0, 0.0, 0.3, 2.0);
        for (out, x) in buffer.iter().zip([0.1, 0.5, -0.9]) {
            assert_eq!(*out, wavefold(x, 1.0, 0.0, 0.3, 2.0));
        }
    }
}
