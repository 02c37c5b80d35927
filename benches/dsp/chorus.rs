//! Benchmarks for the modulated-delay chorus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::chorus::Chorus;

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chorus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/chorus");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // Full-wet vibrato
        let mut chorus = Chorus::new();
        chorus.prepare(SAMPLE_RATE, 2);
        chorus.set_rate(4.0);
        chorus.set_depth(0.5);
        chorus.set_centre_delay(10.0);
        chorus.set_mix(1.0);
        let mut left = input.clone();
        let mut right = input.clone();
        group.bench_with_input(BenchmarkId::new("vibrato_stereo", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                chorus.process_channel(0, black_box(&mut left));
                chorus.process_channel(1, black_box(&mut right));
            })
        });

        // Feedback path engaged
        let mut chorus = Chorus::new();
        chorus.prepare(SAMPLE_RATE, 1);
        chorus.set_rate(0.5);
        chorus.set_depth(1.0);
        chorus.set_centre_delay(25.0);
        chorus.set_feedback(0.7);
        chorus.set_mix(0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("feedback_mono", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chorus.process_channel(0, black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
