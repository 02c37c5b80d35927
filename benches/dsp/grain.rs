//! Benchmarks for grain record/playback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::grain::{GrainBuffer, GrainConfig};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_grain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/grain");
    let config = GrainConfig::default();

    for &size in BLOCK_SIZES {
        let loud = test_signal(size);
        let quiet = vec![0.01f32; size];

        // Gate open: record and play
        let mut grain = GrainBuffer::new(30_000, 20_000);
        let mut buffer = loud.clone();
        group.bench_with_input(BenchmarkId::new("record_play", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&loud);
                black_box(grain.process(black_box(&mut buffer), &config))
            })
        });

        // Gate closed: only the peak scan runs
        let mut grain = GrainBuffer::new(30_000, 20_000);
        let mut buffer = quiet.clone();
        group.bench_with_input(BenchmarkId::new("gated", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&quiet);
                black_box(grain.process(black_box(&mut buffer), &config))
            })
        });
    }

    group.finish();
}
