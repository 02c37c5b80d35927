//! Benchmarks for DSP primitives and complete effects.
//!
//! Run with: cargo bench
//!
//! Every effect must finish a block well inside the real-time deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (fold, filter, grain, mix, chorus, reverb)
//!   - scenarios/*  Whole effects processing stereo blocks

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

/// A deterministic test tone loud enough to open every gate.
pub fn test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.6 * (std::f32::consts::TAU * 220.0 * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_fold,
    dsp::bench_filter,
    dsp::bench_grain,
    dsp::bench_mix,
    dsp::bench_chorus,
    dsp::bench_reverb,
    // Whole effects
    scenarios::bench_effects,
);
criterion_main!(benches);
