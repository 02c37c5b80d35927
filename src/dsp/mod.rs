//! Low-level DSP primitives used by the effects.
//!
//! Every stage here is an independent value-like struct that holds its own
//! state between calls. Nothing allocates after `prepare`/construction, so the
//! stages are safe to drive directly from an audio callback.

/// Fractional delay line for modulated delays.
pub mod delay;
/// Modulated-delay chorus/vibrato.
pub mod chorus;
/// Fixed-ratio threshold compression with make-up gain.
pub mod compressor;
/// Gain/bias/threshold reflection waveshaper.
pub mod fold;
/// Second-order IIR tone filters.
pub mod filter;
/// Circular record/playback grain buffers.
pub mod grain;
/// Low frequency oscillators.
pub mod lfo;
/// Dry/wet capture and crossfade.
pub mod mix;
/// LFO-driven parameter paths.
pub mod modulate;
/// Freeverb-style stereo reverb.
pub mod reverb;
/// Click-free parameter ramps.
pub mod smooth;

pub use lfo::{Lfo, LfoWaveform};
pub use smooth::SmoothedValue;
