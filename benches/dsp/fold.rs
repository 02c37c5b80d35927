//! Benchmarks for the wavefolder shaping stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::fold;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fold");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        // Mostly inside the threshold, few reflections
        group.bench_with_input(BenchmarkId::new("gentle", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                fold::wavefold_buffer(
                    black_box(&mut buffer),
                    black_box(1.0),
                    black_box(0.0),
                    black_box(0.8),
                    black_box(1.0),
                );
            })
        });

        // Hot drive, every sample reflects
        group.bench_with_input(BenchmarkId::new("hot", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                fold::wavefold_buffer(
                    black_box(&mut buffer),
                    black_box(8.0),
                    black_box(0.3),
                    black_box(0.2),
                    black_box(0.5),
                );
            })
        });
    }

    group.finish();
}
